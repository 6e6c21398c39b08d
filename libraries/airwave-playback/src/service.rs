//! Player service
//!
//! Runs a [`PlaybackController`] on its own task. The task owns the
//! controller outright and feeds it from one inbox plus a progress ticker;
//! everything else talks to it through a cloneable [`PlayerHandle`].

use crate::artwork::LoaderRequester;
use crate::config::PlayerConfig;
use crate::connectivity::ConnectivityMonitor;
use crate::controller::{Collaborators, PlaybackController};
use crate::engine::PlaybackEngine;
use crate::error::{PlaybackError, Result};
use crate::events::{PlayerEvent, PlayerSnapshot};
use crate::message::{ControllerMessage, PlayerCommand, RemoteCommand, RemoteCommandStatus};
use crate::now_playing::NowPlayingPublisher;
use crate::persistence::ProgressPersister;
use crate::types::PlaybackState;
use airwave_artwork::ArtworkLoader;
use airwave_core::{Episode, EpisodeCatalog, Station};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Broadcast buffer for [`PlayerEvent`]s
const EVENT_CAPACITY: usize = 64;

/// Platform pieces the service is built from
pub struct PlayerParts {
    pub engine: Box<dyn PlaybackEngine>,
    pub catalog: Arc<dyn EpisodeCatalog>,
    pub persister: Arc<dyn ProgressPersister>,
    pub publisher: Arc<dyn NowPlayingPublisher>,
}

/// Task that owns the controller
pub struct PlayerService {
    controller: PlaybackController,
    inbox: mpsc::UnboundedReceiver<ControllerMessage>,
    events: broadcast::Sender<PlayerEvent>,
    tick_interval: Duration,
    forwarder: JoinHandle<()>,
}

impl PlayerService {
    /// Start the player on the current tokio runtime
    ///
    /// Reachability transitions from `monitor` are forwarded into the
    /// controller's inbox for as long as the service runs. Await the
    /// returned task after [`PlayerHandle::shutdown`] to know it has
    /// finished.
    pub fn spawn(
        config: PlayerConfig,
        parts: PlayerParts,
        monitor: &dyn ConnectivityMonitor,
    ) -> Result<(PlayerHandle, JoinHandle<()>)> {
        config.validate()?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        // Subscribe before sampling so no transition falls in between
        let mut transitions = monitor.subscribe();
        let connected = monitor.is_connected();

        let loader = ArtworkLoader::with_timeout(config.artwork_cache_size, config.artwork_timeout())
            .with_max_bytes(config.max_artwork_bytes);
        let artwork = Arc::new(LoaderRequester::new(loader, inbox_tx.clone()));

        let tick_interval = config.tick_interval();
        let controller = PlaybackController::new(
            config,
            Collaborators {
                engine: parts.engine,
                catalog: parts.catalog,
                persister: parts.persister,
                publisher: parts.publisher,
                artwork,
            },
            inbox_tx.clone(),
            connected,
        );

        let forward_tx = inbox_tx.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(connected) = transitions.recv().await {
                if forward_tx
                    .send(ControllerMessage::Connectivity(connected))
                    .is_err()
                {
                    break;
                }
            }
            debug!("Connectivity forwarder finished");
        });

        let handle = PlayerHandle {
            inbox: inbox_tx,
            snapshot: controller.subscribe_snapshot(),
            events: events.clone(),
        };

        let service = Self {
            controller,
            inbox: inbox_rx,
            events,
            tick_interval,
            forwarder,
        };
        let task = tokio::spawn(service.run());

        Ok((handle, task))
    }

    async fn run(mut self) {
        let mut ticker = time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick completes immediately
        ticker.tick().await;

        info!("Player service started");

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    let Some(message) = message else { break };
                    let shutdown = matches!(message, ControllerMessage::Shutdown(_));

                    self.controller.handle(message);
                    self.broadcast_events();

                    if shutdown {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.controller.tick();
                    self.broadcast_events();
                }
            }
        }

        self.forwarder.abort();
        let _ = (&mut self.forwarder).await;
        info!("Player service stopped");
    }

    fn broadcast_events(&mut self) {
        for event in self.controller.drain_events() {
            // No subscribers is fine
            let _ = self.events.send(event);
        }
    }
}

/// Cloneable handle to a running [`PlayerService`]
#[derive(Clone)]
pub struct PlayerHandle {
    inbox: mpsc::UnboundedSender<ControllerMessage>,
    snapshot: watch::Receiver<PlayerSnapshot>,
    events: broadcast::Sender<PlayerEvent>,
}

impl PlayerHandle {
    /// Play an episode within its podcast's episode list
    pub fn play_episode(&self, episode: Episode) -> Result<()> {
        self.command(PlayerCommand::PlayEpisode {
            episode,
            playlist: None,
        })
    }

    /// Play an episode within an explicit ordered list
    pub fn play_episode_in(&self, episode: Episode, playlist: Vec<Episode>) -> Result<()> {
        self.command(PlayerCommand::PlayEpisode {
            episode,
            playlist: Some(playlist),
        })
    }

    pub fn play_station(&self, station: Station) -> Result<()> {
        self.command(PlayerCommand::PlayStation(station))
    }

    pub fn toggle(&self) -> Result<()> {
        self.command(PlayerCommand::TogglePlayPause)
    }

    pub fn next(&self) -> Result<()> {
        self.command(PlayerCommand::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.command(PlayerCommand::Previous)
    }

    /// Dismiss the pending notice
    pub fn acknowledge_notice(&self) -> Result<()> {
        self.command(PlayerCommand::AcknowledgeNotice)
    }

    /// Seek the current episode, in seconds
    ///
    /// Fails with [`PlaybackError::SeekUnsupported`] unless an episode is
    /// current.
    pub async fn seek(&self, seconds: f64) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.command(PlayerCommand::Seek {
            seconds,
            reply: Some(reply),
        })?;
        rx.await.map_err(|_| PlaybackError::ControllerClosed)?
    }

    /// Forward an OS remote command
    pub async fn remote(&self, command: RemoteCommand) -> Result<RemoteCommandStatus> {
        let (reply, rx) = oneshot::channel();
        self.command(PlayerCommand::Remote {
            command,
            reply: Some(reply),
        })?;
        rx.await.map_err(|_| PlaybackError::ControllerClosed)
    }

    /// Current controller state
    pub async fn state(&self) -> Result<PlaybackState> {
        let (reply, rx) = oneshot::channel();
        self.send(ControllerMessage::Inspect(reply))?;
        rx.await.map_err(|_| PlaybackError::ControllerClosed)
    }

    /// Latest UI snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Watch UI snapshots
    pub fn watch(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshot.clone()
    }

    /// Subscribe to player events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Persist final progress, clear now-playing and stop the service
    pub async fn shutdown(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(ControllerMessage::Shutdown(reply))?;
        rx.await.map_err(|_| PlaybackError::ControllerClosed)
    }

    fn command(&self, command: PlayerCommand) -> Result<()> {
        self.send(command.into())
    }

    fn send(&self, message: ControllerMessage) -> Result<()> {
        self.inbox
            .send(message)
            .map_err(|_| PlaybackError::ControllerClosed)
    }
}
