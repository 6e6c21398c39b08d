/// Station domain type
use super::ids::StationId;
use super::media::MediaLocator;
use serde::{Deserialize, Serialize};
use url::Url;

/// Live stream endpoint. Always played from the live edge, no resume position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub title: String,
    pub stream_url: Url,
    pub artwork_url: Option<Url>,

    /// Artwork bytes stored with the station (takes precedence over `artwork_url`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Vec<u8>>,
}

impl Station {
    /// Create a new station with a generated id
    pub fn new(title: impl Into<String>, stream_url: Url) -> Self {
        Self {
            id: StationId::generate(),
            title: title.into(),
            stream_url,
            artwork_url: None,
            image_data: None,
        }
    }

    /// Stream locator for the engine
    pub fn locator(&self) -> MediaLocator {
        MediaLocator::Remote(self.stream_url.clone())
    }
}
