use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading artwork
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Artwork request to {url} returned {status}")]
    Status { url: String, status: u16 },

    /// URL scheme the loader cannot read
    #[error("Unsupported artwork URL: {0}")]
    UnsupportedUrl(String),

    /// Artwork too large
    #[error("Artwork too large: {0} bytes (max {1} bytes)")]
    TooLarge(usize, usize),
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
