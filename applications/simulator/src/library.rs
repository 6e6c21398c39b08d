//! In-memory library backing a simulation run

use crate::script::Script;
use airwave_core::{
    AirwaveError, Episode, EpisodeCatalog, EpisodeId, MediaLocator, PodcastId, ProgressStore,
    Station, StationId,
};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

/// Saved state of one episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeProgress {
    pub progress: f64,
    pub duration: Option<f64>,
}

pub struct Library {
    episodes: RwLock<Vec<Episode>>,
    stations: HashMap<String, Station>,
    media_durations: Vec<(MediaLocator, f64)>,
}

impl Library {
    pub fn from_script(script: &Script) -> Self {
        let mut episodes = Vec::new();
        let mut media_durations = Vec::new();

        for podcast in &script.podcasts {
            let podcast_id = PodcastId::new(podcast.id.clone());
            for entry in &podcast.episodes {
                let episode = Episode {
                    id: EpisodeId::new(entry.id.clone()),
                    title: entry.title.clone(),
                    audio_url: entry.audio_url.clone(),
                    local_file: entry.local_file.clone(),
                    artwork_url: entry
                        .artwork_url
                        .clone()
                        .or_else(|| podcast.artwork_url.clone()),
                    published_at: entry.published_at,
                    duration: entry.duration,
                    progress: entry.progress,
                    podcast_id: Some(podcast_id.clone()),
                };
                if let Some(seconds) = entry.media_duration {
                    media_durations.push((episode.locator(), seconds));
                }
                episodes.push(episode);
            }
        }

        let stations = script
            .stations
            .iter()
            .map(|entry| {
                let station = Station {
                    id: StationId::new(entry.id.clone()),
                    title: entry.title.clone(),
                    stream_url: entry.stream_url.clone(),
                    artwork_url: entry.artwork_url.clone(),
                    image_data: None,
                };
                (entry.id.clone(), station)
            })
            .collect();

        Self {
            episodes: RwLock::new(episodes),
            stations,
            media_durations,
        }
    }

    /// Current copy of an episode, including saved progress
    pub fn episode(&self, id: &str) -> Option<Episode> {
        self.read()
            .iter()
            .find(|episode| episode.id.as_str() == id)
            .cloned()
    }

    pub fn station(&self, id: &str) -> Option<Station> {
        self.stations.get(id).cloned()
    }

    /// Durations the simulated player should report per locator
    pub fn media_durations(&self) -> &[(MediaLocator, f64)] {
        &self.media_durations
    }

    /// Progress of every episode, keyed by id
    pub fn progress_report(&self) -> BTreeMap<String, EpisodeProgress> {
        self.read()
            .iter()
            .map(|episode| {
                (
                    episode.id.as_str().to_string(),
                    EpisodeProgress {
                        progress: episode.progress,
                        duration: episode.duration,
                    },
                )
            })
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Episode>> {
        self.episodes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(
        &self,
        id: &EpisodeId,
        apply: impl FnOnce(&mut Episode),
    ) -> airwave_core::Result<()> {
        let mut episodes = self.episodes.write().unwrap_or_else(PoisonError::into_inner);
        let episode = episodes
            .iter_mut()
            .find(|episode| &episode.id == id)
            .ok_or_else(|| AirwaveError::not_found("Episode", id.as_str()))?;
        apply(episode);
        Ok(())
    }
}

impl EpisodeCatalog for Library {
    fn episodes_of(&self, podcast: &PodcastId) -> Vec<Episode> {
        self.read()
            .iter()
            .filter(|episode| episode.podcast_id.as_ref() == Some(podcast))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProgressStore for Library {
    async fn save_progress(&self, episode: &EpisodeId, seconds: f64) -> airwave_core::Result<()> {
        self.update(episode, |episode| episode.progress = seconds)
    }

    async fn save_duration(&self, episode: &EpisodeId, seconds: f64) -> airwave_core::Result<()> {
        self.update(episode, |episode| episode.duration = Some(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Library {
        let script = Script::from_toml_str(
            r#"
[[podcasts]]
id = "news"
title = "Morning News"
feed_url = "https://feeds.example.com/news.xml"
artwork_url = "https://img.example.com/news.png"

[[podcasts.episodes]]
id = "ep-1"
title = "Monday"
audio_url = "https://cdn.example.com/ep-1.mp3"
published_at = "2024-03-04T06:00:00Z"
media_duration = 1800.0

[[podcasts.episodes]]
id = "ep-2"
title = "Tuesday"
audio_url = "https://cdn.example.com/ep-2.mp3"
published_at = "2024-03-05T06:00:00Z"

[[podcasts]]
id = "tech"
title = "Tech Talk"
feed_url = "https://feeds.example.com/tech.xml"

[[podcasts.episodes]]
id = "tt-1"
title = "Chips"
audio_url = "https://cdn.example.com/tt-1.mp3"
published_at = "2024-03-01T06:00:00Z"

[[stations]]
id = "jazz"
title = "Jazz FM"
stream_url = "https://radio.example.com/jazz"
"#,
        )
        .unwrap();
        Library::from_script(&script)
    }

    #[test]
    fn catalog_filters_by_podcast() {
        let library = library();

        let news = library.episodes_of(&PodcastId::new("news"));
        assert_eq!(news.len(), 2);
        assert!(news
            .iter()
            .all(|episode| episode.podcast_id == Some(PodcastId::new("news"))));
        assert!(library.episodes_of(&PodcastId::new("unknown")).is_empty());
    }

    #[test]
    fn episodes_inherit_podcast_artwork() {
        let library = library();
        let episode = library.episode("ep-1").unwrap();
        assert_eq!(
            episode.artwork_url.map(|url| url.to_string()),
            Some("https://img.example.com/news.png".to_string())
        );
        assert!(library.episode("tt-1").unwrap().artwork_url.is_none());
    }

    #[test]
    fn media_durations_are_keyed_by_locator() {
        let library = library();
        let episode = library.episode("ep-1").unwrap();
        assert_eq!(library.media_durations(), &[(episode.locator(), 1800.0)]);
    }

    #[tokio::test]
    async fn store_updates_episodes_in_place() {
        let library = library();
        let id = EpisodeId::new("ep-2");

        library.save_progress(&id, 95.5).await.unwrap();
        library.save_duration(&id, 2400.0).await.unwrap();

        let episode = library.episode("ep-2").unwrap();
        assert_eq!(episode.progress, 95.5);
        assert_eq!(episode.duration, Some(2400.0));
        assert_eq!(
            library.progress_report()["ep-2"],
            EpisodeProgress {
                progress: 95.5,
                duration: Some(2400.0)
            }
        );
    }

    #[tokio::test]
    async fn store_rejects_unknown_episodes() {
        let library = library();
        let result = library.save_progress(&EpisodeId::new("nope"), 1.0).await;
        assert!(matches!(result, Err(AirwaveError::NotFound { .. })));
    }

    #[test]
    fn stations_are_looked_up_by_script_id() {
        let library = library();
        let station = library.station("jazz").unwrap();
        assert_eq!(station.id, StationId::new("jazz"));
        assert!(library.station("rock").is_none());
    }
}
