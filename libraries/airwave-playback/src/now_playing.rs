//! System now-playing surface (lock screen, control center, media session)

use airwave_artwork::ArtworkData;
use std::sync::Arc;
use url::Url;

/// Artwork shown with the now-playing entry
#[derive(Debug, Clone, PartialEq)]
pub enum NowPlayingArtwork {
    /// Decoded image bytes
    Image(Arc<ArtworkData>),
    /// Image not loaded yet; the surface may fetch it itself
    Locator(Url),
}

/// Metadata for the system now-playing entry
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingInfo {
    pub title: String,
    pub artwork: Option<NowPlayingArtwork>,
    /// Elapsed time in seconds
    pub elapsed: f64,
    /// Total time in seconds (0 for live streams or unknown)
    pub total: f64,
    pub is_live_stream: bool,
    /// 1.0 while audio is playing, 0.0 otherwise
    pub playback_rate: f64,
}

/// Platform now-playing publisher
///
/// `None` clears the entry.
#[cfg_attr(test, mockall::automock)]
pub trait NowPlayingPublisher: Send + Sync {
    fn publish(&self, info: Option<NowPlayingInfo>);
}
