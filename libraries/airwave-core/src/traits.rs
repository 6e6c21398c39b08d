//! Collaborator traits implemented by the host application
//!
//! The playback controller never owns library entities. It reads episodes through
//! [`EpisodeCatalog`] and writes progress back through [`ProgressStore`].

use crate::error::Result;
use crate::types::{Episode, EpisodeId, PodcastId};
use async_trait::async_trait;

/// Read access to the library's episodes
///
/// Implementations must be cheap: the controller calls this on every play
/// without an explicit playlist, from its serialized context.
pub trait EpisodeCatalog: Send + Sync {
    /// All episodes currently known for a podcast, in storage order
    fn episodes_of(&self, podcast: &PodcastId) -> Vec<Episode>;
}

/// Write access for playback progress and learned durations
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Persist the resume position of an episode (seconds)
    async fn save_progress(&self, episode: &EpisodeId, seconds: f64) -> Result<()>;

    /// Persist a duration learned from the media engine (seconds)
    async fn save_duration(&self, episode: &EpisodeId, seconds: f64) -> Result<()>;
}
