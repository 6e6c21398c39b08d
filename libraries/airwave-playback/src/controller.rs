//! Playback controller
//!
//! The single owner of playback state. Every input (user intents, engine
//! events, reachability transitions, artwork results, progress ticks) is a
//! call on `&mut self`, so handling is strictly sequential and the state
//! machine can be driven deterministically in tests.
//!
//! The controller never blocks: storage writes go through a
//! fire-and-forget [`ProgressPersister`] and artwork loads are requested
//! from an [`ArtworkRequester`] whose results come back as messages.

use crate::artwork::ArtworkRequester;
use crate::config::PlayerConfig;
use crate::engine::{
    EngineEvent, EngineEventKind, EngineStatus, ItemGeneration, ItemSubscription, ObservedEvents,
    PlaybackEngine,
};
use crate::error::{PlaybackError, Result};
use crate::events::{PlayerEvent, PlayerSnapshot};
use crate::message::{ControllerMessage, PlayerCommand, RemoteCommand, RemoteCommandStatus};
use crate::now_playing::{NowPlayingArtwork, NowPlayingInfo, NowPlayingPublisher};
use crate::persistence::ProgressPersister;
use crate::playlist::PlaylistManager;
use crate::types::{PendingPlay, PlaybackState, Playlist, StateKind};
use airwave_artwork::ArtworkData;
use airwave_core::{Episode, EpisodeCatalog, MediaLocator, Station};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};
use url::Url;

/// External collaborators the controller drives
pub struct Collaborators {
    pub engine: Box<dyn PlaybackEngine>,
    pub catalog: Arc<dyn EpisodeCatalog>,
    pub persister: Arc<dyn ProgressPersister>,
    pub publisher: Arc<dyn NowPlayingPublisher>,
    pub artwork: Arc<dyn ArtworkRequester>,
}

/// Playback state machine
pub struct PlaybackController {
    config: PlayerConfig,
    state: PlaybackState,
    reported_kind: StateKind,

    engine: Box<dyn PlaybackEngine>,
    playlists: PlaylistManager,
    persister: Arc<dyn ProgressPersister>,
    publisher: Arc<dyn NowPlayingPublisher>,
    artwork: Arc<dyn ArtworkRequester>,

    // Engine item tracking
    inbox: mpsc::UnboundedSender<ControllerMessage>,
    generation: ItemGeneration,
    subscription: Option<ItemSubscription>,
    engine_playing: bool,
    current_time: f64,

    // Connectivity
    connected: bool,
    connection_lost: bool,

    // Presentation
    notice: Option<String>,
    resolved_artwork: Option<(Url, Arc<ArtworkData>)>,
    requested_artwork: HashSet<Url>,
    last_published: Option<Option<NowPlayingInfo>>,
    snapshot: watch::Sender<PlayerSnapshot>,
    pending_events: Vec<PlayerEvent>,
}

impl PlaybackController {
    /// Create a controller
    ///
    /// `inbox` is the sender side of the queue this controller is fed from;
    /// engine observers post into it. `connected` is the reachability at
    /// startup.
    pub fn new(
        config: PlayerConfig,
        collaborators: Collaborators,
        inbox: mpsc::UnboundedSender<ControllerMessage>,
        connected: bool,
    ) -> Self {
        let (snapshot, _) = watch::channel(PlayerSnapshot {
            connected,
            ..PlayerSnapshot::default()
        });

        Self {
            config,
            state: PlaybackState::Idle,
            reported_kind: StateKind::Idle,
            engine: collaborators.engine,
            playlists: PlaylistManager::new(collaborators.catalog),
            persister: collaborators.persister,
            publisher: collaborators.publisher,
            artwork: collaborators.artwork,
            inbox,
            generation: 0,
            subscription: None,
            engine_playing: false,
            current_time: 0.0,
            connected,
            connection_lost: false,
            notice: None,
            resolved_artwork: None,
            requested_artwork: HashSet::new(),
            last_published: Some(None),
            snapshot,
            pending_events: Vec::new(),
        }
    }

    /// Handle one inbox message
    pub fn handle(&mut self, message: ControllerMessage) {
        match message {
            ControllerMessage::Command(command) => self.handle_command(command),
            ControllerMessage::Engine(event) => self.handle_engine_event(event),
            ControllerMessage::Connectivity(connected) => self.handle_connectivity(connected),
            ControllerMessage::ArtworkLoaded { url, artwork } => {
                self.handle_artwork_loaded(url, artwork);
            }
            ControllerMessage::Tick => self.tick(),
            ControllerMessage::Inspect(reply) => {
                let _ = reply.send(self.state.clone());
            }
            ControllerMessage::Shutdown(reply) => {
                self.teardown();
                let _ = reply.send(());
            }
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PlayEpisode { episode, playlist } => {
                self.play_episode(episode, playlist.map(Playlist::new));
            }
            PlayerCommand::PlayStation(station) => self.play_station(station),
            PlayerCommand::TogglePlayPause => self.toggle(),
            PlayerCommand::Next => self.next(),
            PlayerCommand::Previous => self.previous(),
            PlayerCommand::Seek { seconds, reply } => {
                let result = self.seek(seconds);
                match reply {
                    Some(reply) => {
                        let _ = reply.send(result);
                    }
                    None => {
                        if let Err(e) = result {
                            debug!("Seek ignored: {}", e);
                        }
                    }
                }
            }
            PlayerCommand::Remote { command, reply } => {
                let status = self.remote(command);
                if let Some(reply) = reply {
                    let _ = reply.send(status);
                }
            }
            PlayerCommand::AcknowledgeNotice => self.acknowledge_notice(),
        }
    }

    // ===== User Intents =====

    /// Play an episode, optionally within an explicit playlist
    pub fn play_episode(&mut self, episode: Episode, playlist: Option<Playlist>) {
        self.begin_episode(episode, playlist);
        self.refresh();
    }

    /// Play a live station
    pub fn play_station(&mut self, station: Station) {
        self.begin_station(station);
        self.refresh();
    }

    /// Toggle between playing and paused
    pub fn toggle(&mut self) {
        match std::mem::take(&mut self.state) {
            PlaybackState::PlayingEpisode {
                episode,
                playlist,
                position,
            } => {
                self.pause_engine();
                self.current_time = self.engine.elapsed();
                self.set_state(PlaybackState::PausedEpisode {
                    episode,
                    playlist,
                    position,
                });
            }
            PlaybackState::PausedEpisode {
                episode,
                playlist,
                position,
            } => {
                if self.subscription.is_none() {
                    self.begin_episode(episode, Some(playlist));
                } else {
                    self.resume_engine();
                    self.set_state(PlaybackState::PlayingEpisode {
                        episode,
                        playlist,
                        position,
                    });
                }
            }
            PlaybackState::PlayingStation { station } => {
                self.pause_engine();
                self.set_state(PlaybackState::PausedStation { station });
            }
            PlaybackState::PausedStation { station } => {
                if !self.connected {
                    self.await_connectivity(PendingPlay::Station(station.clone()), Some(station));
                } else if self.subscription.is_none() {
                    self.start_station(station, false);
                } else {
                    self.resume_engine();
                    self.set_state(PlaybackState::PlayingStation { station });
                }
            }
            PlaybackState::BufferingStation { station } => {
                if self.connected {
                    self.start_station(station, false);
                } else {
                    self.await_connectivity(PendingPlay::Station(station.clone()), Some(station));
                }
            }
            awaiting @ PlaybackState::AwaitingConnectivity { .. } => {
                self.state = awaiting;
                self.raise_notice(self.config.offline_notice.clone());
            }
            PlaybackState::Idle => debug!("Toggle ignored, nothing loaded"),
        }
        self.refresh();
    }

    /// Seek the current episode, in seconds
    ///
    /// Positions past a known duration are clamped to it; the clamped value
    /// is what gets persisted and published. Works playing or paused and
    /// never starts playback.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }

        let unsupported = if self.state.current_station().is_some() {
            "live streams"
        } else {
            "an empty player"
        };

        {
            let (PlaybackState::PlayingEpisode {
                episode, playlist, ..
            }
            | PlaybackState::PausedEpisode {
                episode, playlist, ..
            }) = &mut self.state
            else {
                return Err(PlaybackError::SeekUnsupported(unsupported));
            };

            let target = match episode.duration {
                Some(duration) if duration > 0.0 => seconds.min(duration),
                _ => seconds,
            };

            self.engine.seek(target);
            episode.progress = target;
            playlist.update(episode);
            self.persister.save_progress(&episode.id, target);
            self.current_time = target;
            debug!("Seeked {} to {:.1}s", episode.title, target);
        }

        self.refresh();
        Ok(())
    }

    /// Play the next playlist entry
    pub fn next(&mut self) {
        self.skip(true);
    }

    /// Play the previous playlist entry
    pub fn previous(&mut self) {
        self.skip(false);
    }

    fn skip(&mut self, forward: bool) {
        let (PlaybackState::PlayingEpisode {
            playlist, position, ..
        }
        | PlaybackState::PausedEpisode {
            playlist, position, ..
        }) = &self.state
        else {
            debug!("Skip ignored, no episode loaded");
            return;
        };

        let neighbor = if forward {
            playlist.next_after(*position)
        } else {
            playlist.previous_before(*position)
        };

        let Some(neighbor) = neighbor.cloned() else {
            debug!("No {} episode", if forward { "next" } else { "previous" });
            return;
        };

        let playlist = playlist.clone();
        self.play_episode(neighbor, Some(playlist));
    }

    /// Dismiss the pending notice
    pub fn acknowledge_notice(&mut self) {
        self.notice = None;
        self.refresh();
    }

    /// Handle an OS remote command
    pub fn remote(&mut self, command: RemoteCommand) -> RemoteCommandStatus {
        match command {
            RemoteCommand::Play | RemoteCommand::Pause | RemoteCommand::TogglePlayPause
                if self.state.kind() == StateKind::Idle =>
            {
                RemoteCommandStatus::CommandFailed
            }
            RemoteCommand::Play => {
                if !self.state.is_playing() {
                    self.toggle();
                }
                RemoteCommandStatus::Success
            }
            RemoteCommand::Pause => {
                if self.state.is_playing() {
                    self.toggle();
                }
                RemoteCommandStatus::Success
            }
            RemoteCommand::TogglePlayPause => {
                self.toggle();
                RemoteCommandStatus::Success
            }
            RemoteCommand::NextTrack => {
                self.next();
                RemoteCommandStatus::Success
            }
            RemoteCommand::PreviousTrack => {
                self.previous();
                RemoteCommandStatus::Success
            }
            RemoteCommand::ChangePlaybackPosition(seconds) => match self.seek(seconds) {
                Ok(()) => RemoteCommandStatus::Success,
                Err(e) => {
                    debug!("Remote seek failed: {}", e);
                    RemoteCommandStatus::CommandFailed
                }
            },
        }
    }

    // ===== Engine Events =====

    /// Handle an event from the media engine
    ///
    /// Events from retired items are discarded.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let current = self.subscription.as_ref().map(ItemSubscription::generation);
        if current != Some(event.generation) {
            debug!(
                "Discarding {:?} from retired item {}",
                event.kind, event.generation
            );
            return;
        }

        match event.kind {
            EngineEventKind::StatusChanged(status) => self.handle_status(status),
            EngineEventKind::Stalled => self.handle_stall(),
            EngineEventKind::ItemEnded => self.handle_item_ended(),
            EngineEventKind::DurationResolved(seconds) => self.handle_duration(seconds),
        }
        self.refresh();
    }

    fn handle_status(&mut self, status: EngineStatus) {
        self.engine_playing = status == EngineStatus::Playing;
        if !self.engine_playing {
            return;
        }

        // Audio came back on its own
        match std::mem::take(&mut self.state) {
            PlaybackState::BufferingStation { station } => {
                info!("Stream {} resumed, leaving buffering", station.title);
                self.set_state(PlaybackState::PlayingStation { station });
            }
            other => self.state = other,
        }
    }

    fn handle_stall(&mut self) {
        match std::mem::take(&mut self.state) {
            PlaybackState::PlayingStation { station } if !self.connected => {
                warn!("Stream {} stalled while offline, buffering", station.title);
                self.pause_engine();
                self.set_state(PlaybackState::BufferingStation { station });
            }
            other => {
                // Online stalls recover inside the engine
                debug!("Ignoring stall while {}", other.kind());
                self.state = other;
            }
        }
    }

    fn handle_item_ended(&mut self) {
        match std::mem::take(&mut self.state) {
            PlaybackState::PlayingEpisode {
                episode,
                playlist,
                position,
            } => {
                let Some(next) = playlist.next_after(position).cloned() else {
                    info!("Finished {}, end of playlist", episode.title);
                    self.pause_engine();
                    self.current_time = self.engine.elapsed();
                    self.set_state(PlaybackState::PausedEpisode {
                        episode,
                        playlist,
                        position,
                    });
                    return;
                };

                info!("Finished {}, continuing with {}", episode.title, next.title);
                self.state = PlaybackState::PlayingEpisode {
                    episode,
                    playlist: playlist.clone(),
                    position,
                };
                self.begin_episode(next, Some(playlist));
            }
            other => self.state = other,
        }
    }

    fn handle_duration(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            debug!("Ignoring unusable duration {}", seconds);
            return;
        }

        let (PlaybackState::PlayingEpisode {
            episode, playlist, ..
        }
        | PlaybackState::PausedEpisode {
            episode, playlist, ..
        }) = &mut self.state
        else {
            return;
        };

        if episode.duration != Some(seconds) {
            debug!("Duration of {} resolved: {:.1}s", episode.title, seconds);
            episode.duration = Some(seconds);
            playlist.update(episode);
            self.persister.save_duration(&episode.id, seconds);
        }
    }

    // ===== Connectivity =====

    /// Handle a reachability transition
    pub fn handle_connectivity(&mut self, connected: bool) {
        if connected == self.connected {
            return;
        }
        self.connected = connected;
        self.emit(PlayerEvent::ConnectivityChanged { connected });

        if !connected {
            info!("Connection lost");
            self.connection_lost = true;
            self.refresh();
            return;
        }

        info!("Connection restored");
        let was_lost = std::mem::take(&mut self.connection_lost);
        if self.notice.as_deref() == Some(self.config.offline_notice.as_str()) {
            self.notice = None;
        }

        match std::mem::take(&mut self.state) {
            PlaybackState::BufferingStation { station } => {
                info!("Reloading {} after buffering", station.title);
                self.start_station(station, true);
            }
            PlaybackState::AwaitingConnectivity { pending, .. } => {
                info!("Starting {} now that the network is back", pending.title());
                match pending {
                    PendingPlay::Episode { episode, playlist } => {
                        self.start_episode(episode, playlist);
                    }
                    PendingPlay::Station(station) => self.start_station(station, false),
                }
            }
            PlaybackState::PlayingStation { station } if was_lost && !self.engine_playing => {
                info!("Reloading {} after connection loss", station.title);
                self.start_station(station, true);
            }
            other => self.state = other,
        }
        self.refresh();
    }

    // ===== Ticks =====

    /// Periodic progress tick
    ///
    /// While an episode is audibly playing, its progress is persisted
    /// whenever it changed since the last tick.
    pub fn tick(&mut self) {
        if !self.state.is_playing() || !self.engine_playing {
            return;
        }

        let elapsed = self.engine.elapsed();
        if !elapsed.is_finite() || elapsed < 0.0 {
            return;
        }
        self.current_time = elapsed;

        if let PlaybackState::PlayingEpisode {
            episode, playlist, ..
        } = &mut self.state
        {
            if episode.progress != elapsed {
                episode.progress = elapsed;
                playlist.update(episode);
                self.persister.save_progress(&episode.id, elapsed);
            }
        }

        let duration_secs = self.state.current_episode().and_then(|e| e.duration);
        self.emit(PlayerEvent::PositionUpdate {
            position_secs: elapsed,
            duration_secs,
        });
        self.refresh();
    }

    // ===== Artwork =====

    /// Apply a finished artwork load, if it still belongs to the current source
    ///
    /// A failed load is forgotten, so the next refresh requests it again.
    pub fn handle_artwork_loaded(&mut self, url: Url, artwork: Option<Arc<ArtworkData>>) {
        self.requested_artwork.remove(&url);
        let Some(artwork) = artwork else {
            debug!("No artwork available at {}", url);
            return;
        };

        if self.current_artwork_url() != Some(&url) {
            debug!("Discarding artwork for {}, source changed", url);
            return;
        }

        self.resolved_artwork = Some((url, artwork));
        self.refresh();
    }

    fn current_artwork_url(&self) -> Option<&Url> {
        if let Some(episode) = self.state.current_episode() {
            return episode.artwork_url.as_ref();
        }
        self.state
            .current_station()
            .and_then(|station| station.artwork_url.as_ref())
    }

    fn artwork_for(&mut self, url: &Url) -> NowPlayingArtwork {
        if let Some((resolved, data)) = &self.resolved_artwork {
            if resolved == url {
                return NowPlayingArtwork::Image(Arc::clone(data));
            }
        }
        if let Some(data) = self.artwork.cached(url) {
            return NowPlayingArtwork::Image(data);
        }
        if self.requested_artwork.insert(url.clone()) {
            self.artwork.request(url.clone());
        }
        NowPlayingArtwork::Locator(url.clone())
    }

    // ===== Teardown =====

    /// Persist final progress, release the item and clear the now-playing entry
    pub fn teardown(&mut self) {
        if self.subscription.is_some() {
            if let Some(episode) = self.state.current_episode() {
                let elapsed = self.engine.elapsed();
                if elapsed.is_finite() && elapsed >= 0.0 {
                    self.persister.save_progress(&episode.id, elapsed);
                }
            }
        }

        self.subscription = None;
        self.engine.stop();
        self.engine_playing = false;
        self.current_time = 0.0;
        self.notice = None;
        self.set_state(PlaybackState::Idle);
        self.refresh();
        info!("Playback controller shut down");
    }

    // ===== State Queries =====

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Pending user-facing notice
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Elapsed time of the current item, in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Generation of the currently subscribed item
    pub fn current_generation(&self) -> Option<ItemGeneration> {
        self.subscription.as_ref().map(ItemSubscription::generation)
    }

    /// Whether the engine last reported audible playback
    pub fn is_engine_playing(&self) -> bool {
        self.engine_playing
    }

    /// Receiver for UI snapshots
    pub fn subscribe_snapshot(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshot.subscribe()
    }

    // ===== Events =====

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn raise_notice(&mut self, message: String) {
        self.notice = Some(message.clone());
        self.emit(PlayerEvent::Notice { message });
    }

    fn set_state(&mut self, state: PlaybackState) {
        let kind = state.kind();
        self.state = state;
        if kind != self.reported_kind {
            debug!("State: {} -> {}", self.reported_kind, kind);
            self.reported_kind = kind;
            self.emit(PlayerEvent::StateChanged { state: kind });
        }
    }

    // ===== Transitions =====

    fn begin_episode(&mut self, episode: Episode, playlist: Option<Playlist>) {
        if self.connected {
            self.start_episode(episode, playlist);
        } else {
            info!("Offline, holding {} until the network returns", episode.title);
            let station = self.state.current_station().cloned();
            self.await_connectivity(PendingPlay::Episode { episode, playlist }, station);
        }
    }

    fn begin_station(&mut self, station: Station) {
        if self.connected {
            self.start_station(station, false);
        } else {
            info!("Offline, holding {} until the network returns", station.title);
            self.await_connectivity(PendingPlay::Station(station.clone()), Some(station));
        }
    }

    fn start_episode(&mut self, mut episode: Episode, explicit: Option<Playlist>) {
        let start = episode.resume_position(self.config.restart_threshold_secs);
        if start == 0.0 && episode.progress > 0.0 {
            debug!("{} nearly finished, starting over", episode.title);
            episode.progress = 0.0;
            self.persister.save_progress(&episode.id, 0.0);
        }

        let playlist = self.playlists.build(&episode, explicit);
        let position = playlist.index_of(&episode.id).unwrap_or(0);

        if let Err(e) = self.load_item(&episode.locator(), ObservedEvents::EPISODE) {
            self.fail_load(&episode.title, e, None);
            return;
        }

        if start > 0.0 {
            self.engine.seek(start);
        }
        self.resume_engine();
        self.current_time = start;
        self.notice = None;

        info!("Playing {} from {:.1}s", episode.title, start);
        let title = episode.title.clone();
        self.set_state(PlaybackState::PlayingEpisode {
            episode,
            playlist,
            position,
        });
        self.emit(PlayerEvent::SourceChanged {
            title,
            is_live: false,
        });
    }

    fn start_station(&mut self, station: Station, reload: bool) {
        if let Err(e) = self.load_item(&station.locator(), ObservedEvents::STATION) {
            let fallback = reload.then(|| station.clone());
            self.fail_load(&station.title, e, fallback);
            return;
        }

        self.resume_engine();
        self.current_time = 0.0;
        self.notice = None;

        info!("Playing station {}", station.title);
        let title = station.title.clone();
        self.set_state(PlaybackState::PlayingStation { station });
        if !reload {
            self.emit(PlayerEvent::SourceChanged {
                title,
                is_live: true,
            });
        }
    }

    fn await_connectivity(&mut self, pending: PendingPlay, station: Option<Station>) {
        self.release_item();
        self.current_time = match &pending {
            PendingPlay::Episode { episode, .. } => episode.progress,
            PendingPlay::Station(_) => 0.0,
        };
        self.raise_notice(self.config.offline_notice.clone());
        self.set_state(PlaybackState::AwaitingConnectivity {
            pending,
            also_paused_from_station: station,
        });
    }

    /// Retire the current item's observer and load a new item
    fn load_item(&mut self, locator: &MediaLocator, observed: ObservedEvents) -> Result<()> {
        self.subscription = None;
        self.generation += 1;

        let (subscription, observer) =
            ItemSubscription::new(self.generation, observed, self.inbox.clone());
        self.engine.load(locator, observer)?;
        self.subscription = Some(subscription);
        Ok(())
    }

    fn release_item(&mut self) {
        if self.subscription.take().is_some() {
            self.engine.pause();
        }
        self.engine_playing = false;
    }

    fn fail_load(&mut self, title: &str, e: PlaybackError, fallback: Option<Station>) {
        error!("Unable to play {}: {}", title, e);
        self.subscription = None;
        self.engine.stop();
        self.engine_playing = false;
        self.current_time = 0.0;

        self.set_state(match fallback {
            Some(station) => PlaybackState::PausedStation { station },
            None => PlaybackState::Idle,
        });
        self.emit(PlayerEvent::Error {
            message: e.to_string(),
        });
        self.raise_notice(format!("Unable to play {title}"));
    }

    fn pause_engine(&mut self) {
        self.engine.pause();
        self.engine_playing = false;
    }

    fn resume_engine(&mut self) {
        self.engine.play();
        self.engine_playing = true;
    }

    // ===== Publishing =====

    fn refresh(&mut self) {
        let info = self.now_playing_info();
        if self.last_published.as_ref() != Some(&info) {
            self.publisher.publish(info.clone());
            self.last_published = Some(info);
        }

        let snapshot = self.snapshot_value();
        self.snapshot.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    fn now_playing_info(&mut self) -> Option<NowPlayingInfo> {
        let playback_rate = if self.state.is_playing() && self.engine_playing {
            1.0
        } else {
            0.0
        };

        if let Some(episode) = self.state.current_episode() {
            let title = episode.title.clone();
            let total = episode.duration.unwrap_or(0.0);
            let artwork_url = episode.artwork_url.clone();
            let artwork = artwork_url.map(|url| self.artwork_for(&url));
            return Some(NowPlayingInfo {
                title,
                artwork,
                elapsed: self.current_time,
                total,
                is_live_stream: false,
                playback_rate,
            });
        }

        let station = self.state.current_station()?.clone();
        // Bundled station images beat anything fetched
        let artwork = match (station.image_data, station.artwork_url) {
            (Some(bytes), _) => Some(NowPlayingArtwork::Image(Arc::new(
                ArtworkData::from_bytes(bytes),
            ))),
            (None, Some(url)) => Some(self.artwork_for(&url)),
            (None, None) => None,
        };

        Some(NowPlayingInfo {
            title: station.title,
            artwork,
            elapsed: self.current_time,
            total: 0.0,
            is_live_stream: true,
            playback_rate,
        })
    }

    fn snapshot_value(&self) -> PlayerSnapshot {
        let episode = self.state.current_episode();
        PlayerSnapshot {
            state: self.state.kind(),
            title: self.state.display_title().map(str::to_string),
            is_live: episode.is_none() && self.state.current_station().is_some(),
            is_playing: self.state.is_playing() && self.engine_playing,
            current_time: self.current_time,
            total_time: episode.and_then(|e| e.duration),
            connected: self.connected,
            notice: self.notice.clone(),
        }
    }
}
