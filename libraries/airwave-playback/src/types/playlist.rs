use airwave_core::{Episode, EpisodeId};

/// Ordered episodes the current episode belongs to
///
/// Next/previous navigate this list; it is never empty while an episode
/// is current.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playlist {
    episodes: Vec<Episode>,
}

impl Playlist {
    /// Create a playlist from an ordered list
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }

    /// Playlist holding a single episode
    pub fn singleton(episode: Episode) -> Self {
        Self {
            episodes: vec![episode],
        }
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Episodes in order
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn get(&self, index: usize) -> Option<&Episode> {
        self.episodes.get(index)
    }

    /// Position of an episode by identity
    pub fn index_of(&self, id: &EpisodeId) -> Option<usize> {
        self.episodes.iter().position(|episode| &episode.id == id)
    }

    pub fn contains(&self, id: &EpisodeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Entry after `index`
    pub fn next_after(&self, index: usize) -> Option<&Episode> {
        self.episodes.get(index.checked_add(1)?)
    }

    /// Entry before `index`
    pub fn previous_before(&self, index: usize) -> Option<&Episode> {
        self.episodes.get(index.checked_sub(1)?)
    }

    /// Replace the entry with the same identity
    pub(crate) fn update(&mut self, episode: &Episode) {
        if let Some(index) = self.index_of(&episode.id) {
            self.episodes[index] = episode.clone();
        }
    }
}
