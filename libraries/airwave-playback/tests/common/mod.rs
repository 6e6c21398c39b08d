//! Shared fakes for controller and service tests

#![allow(dead_code)]

use airwave_artwork::ArtworkData;
use airwave_core::{Episode, EpisodeCatalog, EpisodeId, MediaLocator, PodcastId, Station};
use airwave_playback::{
    ArtworkRequester, Collaborators, ControllerMessage, EngineStatus, ItemObserver,
    NowPlayingInfo, NowPlayingPublisher, PlaybackController, PlaybackEngine, PlaybackError,
    PlayerConfig, ProgressPersister, Result,
};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use url::Url;

// ===== Engine =====

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Load(MediaLocator),
    Play,
    Pause,
    Seek(f64),
    Stop,
}

#[derive(Default)]
pub struct EngineLog {
    pub calls: Vec<EngineCall>,
    pub observer: Option<ItemObserver>,
    pub elapsed: f64,
    pub failing_hosts: Vec<String>,
}

/// Engine double that records calls and reports status like AVPlayer does
#[derive(Clone, Default)]
pub struct FakeEngine {
    pub log: Arc<Mutex<EngineLog>>,
}

impl FakeEngine {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.log.lock().unwrap().calls.clear();
    }

    pub fn loads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, EngineCall::Load(_)))
            .count()
    }

    pub fn observer(&self) -> ItemObserver {
        self.log
            .lock()
            .unwrap()
            .observer
            .clone()
            .expect("no item loaded")
    }

    pub fn set_elapsed(&self, seconds: f64) {
        self.log.lock().unwrap().elapsed = seconds;
    }

    pub fn fail_host(&self, host: &str) {
        self.log.lock().unwrap().failing_hosts.push(host.to_string());
    }

    fn report(&self, status: EngineStatus) {
        if let Some(observer) = &self.log.lock().unwrap().observer {
            observer.status_changed(status);
        }
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, locator: &MediaLocator, observer: ItemObserver) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        if let MediaLocator::Remote(url) = locator {
            if log
                .failing_hosts
                .iter()
                .any(|host| url.host_str() == Some(host.as_str()))
            {
                return Err(PlaybackError::locator_load(locator, "host unreachable"));
            }
        }
        log.calls.push(EngineCall::Load(locator.clone()));
        log.observer = Some(observer);
        log.elapsed = 0.0;
        Ok(())
    }

    fn play(&mut self) {
        self.log.lock().unwrap().calls.push(EngineCall::Play);
        self.report(EngineStatus::Playing);
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().calls.push(EngineCall::Pause);
        self.report(EngineStatus::Paused);
    }

    fn seek(&mut self, seconds: f64) {
        let mut log = self.log.lock().unwrap();
        log.calls.push(EngineCall::Seek(seconds));
        log.elapsed = seconds;
    }

    fn elapsed(&self) -> f64 {
        self.log.lock().unwrap().elapsed
    }

    fn stop(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.calls.push(EngineCall::Stop);
        log.observer = None;
    }
}

// ===== Library =====

#[derive(Default)]
pub struct MemoryCatalog {
    podcasts: Mutex<HashMap<PodcastId, Vec<Episode>>>,
}

impl MemoryCatalog {
    pub fn insert(&self, podcast: &PodcastId, episodes: Vec<Episode>) {
        self.podcasts
            .lock()
            .unwrap()
            .insert(podcast.clone(), episodes);
    }
}

impl EpisodeCatalog for MemoryCatalog {
    fn episodes_of(&self, podcast: &PodcastId) -> Vec<Episode> {
        self.podcasts
            .lock()
            .unwrap()
            .get(podcast)
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Saved {
    Progress(String, f64),
    Duration(String, f64),
}

#[derive(Default)]
pub struct RecordingPersister {
    pub saved: Mutex<Vec<Saved>>,
}

impl RecordingPersister {
    pub fn saved(&self) -> Vec<Saved> {
        self.saved.lock().unwrap().clone()
    }

    pub fn progress_writes(&self) -> Vec<f64> {
        self.saved()
            .into_iter()
            .filter_map(|saved| match saved {
                Saved::Progress(_, seconds) => Some(seconds),
                Saved::Duration(..) => None,
            })
            .collect()
    }
}

impl ProgressPersister for RecordingPersister {
    fn save_progress(&self, episode: &EpisodeId, seconds: f64) {
        self.saved
            .lock()
            .unwrap()
            .push(Saved::Progress(episode.to_string(), seconds));
    }

    fn save_duration(&self, episode: &EpisodeId, seconds: f64) {
        self.saved
            .lock()
            .unwrap()
            .push(Saved::Duration(episode.to_string(), seconds));
    }
}

// ===== Presentation =====

#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<Option<NowPlayingInfo>>>,
}

impl RecordingPublisher {
    pub fn last(&self) -> Option<NowPlayingInfo> {
        self.published.lock().unwrap().last().cloned().flatten()
    }
}

impl NowPlayingPublisher for RecordingPublisher {
    fn publish(&self, info: Option<NowPlayingInfo>) {
        self.published.lock().unwrap().push(info);
    }
}

pub struct NoArtwork;

impl ArtworkRequester for NoArtwork {
    fn cached(&self, _url: &Url) -> Option<Arc<ArtworkData>> {
        None
    }

    fn request(&self, _url: Url) {}
}

// ===== Fixtures =====

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// Episode with a fixed id, published `day` days after the epoch
pub fn episode(id: &str, podcast: &PodcastId, day: i64) -> Episode {
    let mut episode = Episode::new(
        format!("Episode {id}"),
        url(&format!("https://cdn.example.com/{id}.mp3")),
    )
    .with_podcast(podcast.clone())
    .published(Utc.timestamp_opt(day * 86_400, 0).unwrap());
    episode.id = EpisodeId::new(id);
    episode
}

pub fn station(title: &str) -> Station {
    Station::new(title, url("https://radio.example.com/live"))
}

// ===== Harness =====

/// Controller wired to fakes, with its inbox pumped by hand
pub struct Harness {
    pub controller: PlaybackController,
    pub inbox: mpsc::UnboundedReceiver<ControllerMessage>,
    pub engine: FakeEngine,
    pub catalog: Arc<MemoryCatalog>,
    pub persister: Arc<RecordingPersister>,
    pub publisher: Arc<RecordingPublisher>,
}

impl Harness {
    pub fn new(connected: bool) -> Self {
        Self::with_config(PlayerConfig::default(), connected)
    }

    pub fn with_config(config: PlayerConfig, connected: bool) -> Self {
        let (tx, inbox) = mpsc::unbounded_channel();
        let engine = FakeEngine::default();
        let catalog = Arc::new(MemoryCatalog::default());
        let persister = Arc::new(RecordingPersister::default());
        let publisher = Arc::new(RecordingPublisher::default());

        let controller = PlaybackController::new(
            config,
            Collaborators {
                engine: Box::new(engine.clone()),
                catalog: catalog.clone(),
                persister: persister.clone(),
                publisher: publisher.clone(),
                artwork: Arc::new(NoArtwork),
            },
            tx,
            connected,
        );

        Self {
            controller,
            inbox,
            engine,
            catalog,
            persister,
            publisher,
        }
    }

    /// Deliver everything queued in the inbox
    pub fn pump(&mut self) {
        while let Ok(message) = self.inbox.try_recv() {
            self.controller.handle(message);
        }
    }

    pub fn go_offline(&mut self) {
        self.controller.handle(ControllerMessage::Connectivity(false));
        self.pump();
    }

    pub fn go_online(&mut self) {
        self.controller.handle(ControllerMessage::Connectivity(true));
        self.pump();
    }
}
