//! Playlist derivation
//!
//! Decides which ordered list the current episode belongs to.

use crate::types::Playlist;
use airwave_core::{Episode, EpisodeCatalog};
use std::sync::Arc;

/// Derives playlists from an explicit list or the owning podcast
#[derive(Clone)]
pub struct PlaylistManager {
    catalog: Arc<dyn EpisodeCatalog>,
}

impl PlaylistManager {
    pub fn new(catalog: Arc<dyn EpisodeCatalog>) -> Self {
        Self { catalog }
    }

    /// Build the playlist for `episode`
    ///
    /// An explicit list wins when it contains the episode. Otherwise the
    /// owning podcast's episodes are used, newest first. An episode with no
    /// podcast, or one the catalog no longer lists, plays on its own.
    ///
    /// The returned playlist always contains `episode`, with the caller's
    /// copy replacing the catalog's.
    pub fn build(&self, episode: &Episode, explicit: Option<Playlist>) -> Playlist {
        if let Some(mut playlist) = explicit.filter(|list| list.contains(&episode.id)) {
            playlist.update(episode);
            return playlist;
        }

        let Some(podcast_id) = episode.podcast_id.as_ref() else {
            return Playlist::singleton(episode.clone());
        };

        let mut episodes = self.catalog.episodes_of(podcast_id);
        // Stable: equal timestamps keep catalog order
        episodes.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let mut playlist = Playlist::new(episodes);
        if !playlist.contains(&episode.id) {
            tracing::debug!(
                "Episode {} missing from podcast {}, playing it alone",
                episode.id,
                podcast_id
            );
            return Playlist::singleton(episode.clone());
        }

        playlist.update(episode);
        playlist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwave_core::{EpisodeId, PodcastId};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use std::collections::HashMap;
    use url::Url;

    // ===== Test Helpers =====

    struct FixedCatalog(HashMap<PodcastId, Vec<Episode>>);

    impl EpisodeCatalog for FixedCatalog {
        fn episodes_of(&self, podcast: &PodcastId) -> Vec<Episode> {
            self.0.get(podcast).cloned().unwrap_or_default()
        }
    }

    fn episode(id: &str, podcast: &PodcastId, published_secs: i64) -> Episode {
        let mut episode = Episode::new(
            id,
            Url::parse(&format!("https://example.com/{id}.mp3")).unwrap(),
        )
        .with_podcast(podcast.clone())
        .published(Utc.timestamp_opt(published_secs, 0).unwrap());
        episode.id = EpisodeId::new(id);
        episode
    }

    fn manager(podcast: &PodcastId, episodes: Vec<Episode>) -> PlaylistManager {
        let mut map = HashMap::new();
        map.insert(podcast.clone(), episodes);
        PlaylistManager::new(Arc::new(FixedCatalog(map)))
    }

    fn ids(playlist: &Playlist) -> Vec<&str> {
        playlist.episodes().iter().map(|e| e.id.as_str()).collect()
    }

    // ===== Derivation =====

    #[test]
    fn podcast_episodes_sorted_newest_first() {
        let podcast = PodcastId::new("p");
        let old = episode("old", &podcast, 100);
        let mid = episode("mid", &podcast, 200);
        let new = episode("new", &podcast, 300);
        let manager = manager(&podcast, vec![mid.clone(), old.clone(), new]);

        let playlist = manager.build(&old, None);
        assert_eq!(ids(&playlist), vec!["new", "mid", "old"]);
    }

    #[test]
    fn explicit_playlist_wins() {
        let podcast = PodcastId::new("p");
        let a = episode("a", &podcast, 100);
        let b = episode("b", &podcast, 200);
        let manager = manager(&podcast, vec![a.clone(), b.clone()]);

        let playlist = manager.build(&a, Some(Playlist::new(vec![a.clone(), b])));
        assert_eq!(ids(&playlist), vec!["a", "b"]);
    }

    #[test]
    fn explicit_playlist_without_episode_falls_back() {
        let podcast = PodcastId::new("p");
        let a = episode("a", &podcast, 100);
        let b = episode("b", &podcast, 200);
        let stranger = episode("x", &PodcastId::new("other"), 50);
        let manager = manager(&podcast, vec![a.clone(), b]);

        let playlist = manager.build(&a, Some(Playlist::singleton(stranger)));
        assert_eq!(ids(&playlist), vec!["b", "a"]);
    }

    #[test]
    fn episode_without_podcast_is_singleton() {
        let podcast = PodcastId::new("p");
        let manager = manager(&podcast, vec![]);
        let orphan = Episode::new("orphan", Url::parse("https://example.com/o.mp3").unwrap());

        let playlist = manager.build(&orphan, None);
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.get(0).unwrap().id, orphan.id);
    }

    #[test]
    fn stale_catalog_gives_singleton() {
        let podcast = PodcastId::new("p");
        let listed = episode("listed", &podcast, 100);
        let unlisted = episode("unlisted", &podcast, 200);
        let manager = manager(&podcast, vec![listed]);

        let playlist = manager.build(&unlisted, None);
        assert_eq!(ids(&playlist), vec!["unlisted"]);
    }

    #[test]
    fn caller_copy_replaces_catalog_copy() {
        let podcast = PodcastId::new("p");
        let stored = episode("a", &podcast, 100);
        let fresh = stored.clone().with_progress(120.0);
        let manager = manager(&podcast, vec![stored]);

        let playlist = manager.build(&fresh, None);
        assert_eq!(playlist.get(0).unwrap().progress, 120.0);
    }

    // ===== Property Tests =====

    proptest! {
        #[test]
        fn derived_playlist_is_sorted_and_contains_episode(
            stamps in prop::collection::vec(0i64..1_000, 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let podcast = PodcastId::new("p");
            let episodes: Vec<Episode> = stamps
                .iter()
                .enumerate()
                .map(|(i, secs)| episode(&format!("e{i}"), &podcast, *secs))
                .collect();
            let chosen = episodes[pick.index(episodes.len())].clone();
            let manager = manager(&podcast, episodes.clone());

            let playlist = manager.build(&chosen, None);

            prop_assert_eq!(playlist.len(), episodes.len());
            prop_assert!(playlist.contains(&chosen.id));
            for pair in playlist.episodes().windows(2) {
                prop_assert!(pair[0].published_at >= pair[1].published_at);
            }
        }

        #[test]
        fn equal_timestamps_keep_catalog_order(count in 1usize..10) {
            let podcast = PodcastId::new("p");
            let episodes: Vec<Episode> = (0..count)
                .map(|i| episode(&format!("e{i}"), &podcast, 500))
                .collect();
            let manager = manager(&podcast, episodes.clone());

            let playlist = manager.build(&episodes[0], None);
            let expected: Vec<&str> = episodes.iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(ids(&playlist), expected);
        }
    }
}
