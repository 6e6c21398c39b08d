/// Podcast domain type
use super::ids::PodcastId;
use serde::{Deserialize, Serialize};
use url::Url;

/// A subscribed feed. Episodes point back to it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: PodcastId,
    pub title: String,
    pub feed_url: Url,
    pub artwork_url: Option<Url>,
}

impl Podcast {
    /// Create a new podcast with a generated id
    pub fn new(title: impl Into<String>, feed_url: Url) -> Self {
        Self {
            id: PodcastId::generate(),
            title: title.into(),
            feed_url,
            artwork_url: None,
        }
    }
}
