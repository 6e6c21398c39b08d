use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encoded image bytes ready to hand to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkData {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl ArtworkData {
    /// Create new artwork data
    pub fn new(data: Vec<u8>, mime_type: String) -> Self {
        Self { data, mime_type }
    }

    /// Wrap raw bytes, guessing the MIME type from the magic number
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let mime_type = sniff_mime_type(&data).to_string();
        Self { data, mime_type }
    }

    /// Get the data as a base64-encoded string
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

fn sniff_mime_type(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if data.starts_with(b"GIF8") {
        "image/gif"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else {
        // Default, same as most podcast feeds
        "image/jpeg"
    }
}
