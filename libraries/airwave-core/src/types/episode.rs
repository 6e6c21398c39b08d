/// Episode domain type
use super::ids::{EpisodeId, PodcastId};
use super::media::MediaLocator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// On-demand audio item with a resumable position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique episode identifier
    pub id: EpisodeId,

    /// Episode title
    pub title: String,

    /// Remote enclosure URL
    pub audio_url: Url,

    /// Downloaded copy, preferred over `audio_url` when present
    pub local_file: Option<PathBuf>,

    /// Episode artwork
    pub artwork_url: Option<Url>,

    /// Publication timestamp from the feed
    pub published_at: DateTime<Utc>,

    /// Duration in seconds, learned lazily from the media engine
    pub duration: Option<f64>,

    /// Resume position in seconds
    pub progress: f64,

    /// Owning podcast (back-reference only)
    pub podcast_id: Option<PodcastId>,
}

impl Episode {
    /// Create a new episode with minimal metadata
    pub fn new(title: impl Into<String>, audio_url: Url) -> Self {
        Self {
            id: EpisodeId::generate(),
            title: title.into(),
            audio_url,
            local_file: None,
            artwork_url: None,
            published_at: Utc::now(),
            duration: None,
            progress: 0.0,
            podcast_id: None,
        }
    }

    /// Attach the episode to a podcast
    #[must_use]
    pub fn with_podcast(mut self, podcast_id: PodcastId) -> Self {
        self.podcast_id = Some(podcast_id);
        self
    }

    /// Set the publication timestamp
    #[must_use]
    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = at;
        self
    }

    /// Set a known duration in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Set the stored resume position in seconds
    #[must_use]
    pub fn with_progress(mut self, seconds: f64) -> Self {
        self.progress = seconds;
        self
    }

    /// Where the engine should read this episode from
    pub fn locator(&self) -> MediaLocator {
        match &self.local_file {
            Some(path) => MediaLocator::Local(path.clone()),
            None => MediaLocator::Remote(self.audio_url.clone()),
        }
    }

    /// Seconds left to play, if the duration is known
    pub fn remaining(&self) -> Option<f64> {
        self.duration.map(|duration| duration - self.progress)
    }

    /// Position playback should start from
    ///
    /// An episode with `threshold` seconds or less remaining is treated as
    /// finished and starts over from zero.
    pub fn resume_position(&self, threshold: f64) -> f64 {
        match self.remaining() {
            Some(remaining) if remaining <= threshold => 0.0,
            _ => self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode() -> Episode {
        Episode::new("Pilot", Url::parse("https://example.com/pilot.mp3").unwrap())
    }

    #[test]
    fn episode_creation() {
        let ep = episode();
        assert_eq!(ep.title, "Pilot");
        assert_eq!(ep.progress, 0.0);
        assert!(ep.duration.is_none());
        assert!(ep.podcast_id.is_none());
    }

    #[test]
    fn local_file_is_preferred() {
        let mut ep = episode();
        assert!(ep.locator().is_remote());

        ep.local_file = Some(PathBuf::from("/downloads/pilot.mp3"));
        assert_eq!(
            ep.locator(),
            MediaLocator::Local(PathBuf::from("/downloads/pilot.mp3"))
        );
    }

    #[test]
    fn resume_position_restarts_almost_finished_episodes() {
        let ep = episode().with_duration(600.0).with_progress(590.0);
        assert_eq!(ep.resume_position(10.0), 0.0);

        let ep = episode().with_duration(600.0).with_progress(589.5);
        assert_eq!(ep.resume_position(10.0), 589.5);
    }

    #[test]
    fn resume_position_without_duration_keeps_progress() {
        let ep = episode().with_progress(42.0);
        assert_eq!(ep.remaining(), None);
        assert_eq!(ep.resume_position(10.0), 42.0);
    }
}
