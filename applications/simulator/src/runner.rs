//! Drives a player through a script
//!
//! The runner wires the real controller to the simulated platform player:
//! library → persistence worker, simulated transport → native engine bridge,
//! reachability bridge → network monitor. Every step is followed by a
//! round-trip through the controller inbox so the next step sees its effects.

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::library::{EpisodeProgress, Library};
use crate::publisher::LogPublisher;
use crate::script::{Script, Step};
use airwave_audio_mobile::{
    NativeCallbacks, NativeEngine, PathStatus, ReachabilityBridge, SimulatedControls,
    SimulatedTransport,
};
use airwave_playback::{
    NetworkMonitor, PersistenceWorker, PlayerEvent, PlayerHandle, PlayerParts, PlayerService,
    StateKind,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How long to wait for the controller to observe a reachability change
const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub final_state: StateKind,
    pub title: Option<String>,
    pub notice: Option<String>,
    pub connected: bool,
    pub now_playing_updates: usize,
    pub progress: BTreeMap<String, EpisodeProgress>,
}

pub struct Runner {
    config: SimConfig,
}

/// Everything a step can act on
struct Session<'a> {
    player: &'a PlayerHandle,
    library: &'a Library,
    controls: &'a SimulatedControls,
    reachability: &'a ReachabilityBridge,
}

impl Runner {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Run `script` to completion
    ///
    /// The player is always shut down, and pending progress writes flushed,
    /// before this returns, including when a step fails.
    pub async fn run(&self, script: &Script) -> Result<RunSummary> {
        let library = Arc::new(Library::from_script(script));
        let (persister, writer) = PersistenceWorker::spawn(library.clone());

        let monitor = Arc::new(NetworkMonitor::new(script.start_online));
        let reachability = ReachabilityBridge::new(Arc::clone(&monitor));

        let callbacks = NativeCallbacks::new();
        let transport = SimulatedTransport::new(callbacks.clone());
        let controls = transport.controls();
        for (locator, seconds) in library.media_durations() {
            controls.set_duration(locator.clone(), *seconds);
        }

        let publisher = Arc::new(LogPublisher::new());
        let parts = PlayerParts {
            engine: Box::new(NativeEngine::new(transport, callbacks)),
            catalog: library.clone(),
            persister: Arc::new(persister),
            publisher: publisher.clone(),
        };

        let (player, task) =
            PlayerService::spawn(self.config.player.clone(), parts, monitor.as_ref())?;
        let loggers = self.spawn_loggers(&player);

        info!(
            steps = script.steps.len(),
            online = script.start_online,
            "Starting simulation"
        );

        let session = Session {
            player: &player,
            library: &library,
            controls: &controls,
            reachability: &reachability,
        };
        let outcome = run_steps(&session, &script.steps).await;

        let final_state = player.state().await.map(|state| state.kind());
        let snapshot = player.snapshot();

        player.shutdown().await?;
        task.await.map_err(|e| SimError::Task(e.to_string()))?;
        // The controller held the last persister handle
        writer.await.map_err(|e| SimError::Task(e.to_string()))?;
        for logger in loggers {
            logger.abort();
        }

        outcome?;

        let summary = RunSummary {
            steps: script.steps.len(),
            final_state: final_state?,
            title: snapshot.title,
            notice: snapshot.notice,
            connected: snapshot.connected,
            now_playing_updates: publisher.count(),
            progress: library.progress_report(),
        };
        info!(state = %summary.final_state, "Simulation finished");
        Ok(summary)
    }

    fn spawn_loggers(&self, player: &PlayerHandle) -> Vec<JoinHandle<()>> {
        let mut events = player.subscribe();
        let mut loggers = vec![tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(PlayerEvent::Error { message }) => warn!(%message, "Player error"),
                    Ok(PlayerEvent::PositionUpdate { position_secs, .. }) => {
                        debug!(position_secs, "Position");
                    }
                    Ok(event) => info!(?event, "Player event"),
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event log lagged"),
                    Err(RecvError::Closed) => break,
                }
            }
        })];

        if self.config.simulation.log_snapshots {
            let mut snapshots = player.watch();
            loggers.push(tokio::spawn(async move {
                while snapshots.changed().await.is_ok() {
                    let snapshot = snapshots.borrow_and_update().clone();
                    debug!(
                        state = %snapshot.state,
                        title = ?snapshot.title,
                        playing = snapshot.is_playing,
                        time = snapshot.current_time,
                        connected = snapshot.connected,
                        notice = ?snapshot.notice,
                        "Snapshot"
                    );
                }
            }));
        }

        loggers
    }
}

async fn run_steps(session: &Session<'_>, steps: &[Step]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        let number = index + 1;
        info!(step = number, ?step, "Running step");
        run_step(session, number, step).await?;
        // Round-trip so the step's effects are applied before the next one
        session.player.state().await?;
    }
    Ok(())
}

async fn run_step(session: &Session<'_>, number: usize, step: &Step) -> Result<()> {
    let player = session.player;

    match step {
        Step::PlayEpisode { episode } => {
            let episode = session
                .library
                .episode(episode)
                .ok_or_else(|| SimError::UnknownEpisode(episode.clone()))?;
            player.play_episode(episode)?;
        }
        Step::PlayStation { station } => {
            let station = session
                .library
                .station(station)
                .ok_or_else(|| SimError::UnknownStation(station.clone()))?;
            player.play_station(station)?;
        }
        Step::Toggle => player.toggle()?,
        Step::Next => player.next()?,
        Step::Previous => player.previous()?,
        Step::Seek { seconds } => {
            if let Err(e) = player.seek(*seconds).await {
                warn!(step = number, error = %e, "Seek rejected");
            }
        }
        Step::Remote { command } => {
            let status = player.remote(*command).await?;
            info!(step = number, ?command, ?status, "Remote command handled");
        }
        Step::Offline => {
            session.reachability.on_path_update(PathStatus::Unsatisfied);
            wait_for_connectivity(player, false).await?;
        }
        Step::Online => {
            session.reachability.on_path_update(PathStatus::Satisfied);
            wait_for_connectivity(player, true).await?;
        }
        Step::Stall => session.controls.stall(),
        Step::FinishItem => session.controls.finish_item(),
        Step::Unreachable { host } => session.controls.set_unreachable(host, true),
        Step::Reachable { host } => session.controls.set_unreachable(host, false),
        Step::AcknowledgeNotice => player.acknowledge_notice()?,
        Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
        Step::ExpectState { state } => {
            let actual = player.state().await?.kind();
            if actual != *state {
                return Err(SimError::Expectation {
                    step: number,
                    expected: *state,
                    actual,
                });
            }
        }
    }

    Ok(())
}

async fn wait_for_connectivity(player: &PlayerHandle, connected: bool) -> Result<()> {
    let mut snapshots = player.watch();
    let reached = tokio::time::timeout(
        CONNECTIVITY_TIMEOUT,
        snapshots.wait_for(|snapshot| snapshot.connected == connected),
    )
    .await
    .map_err(|_| SimError::Task(format!("player did not observe connected={connected}")))?;

    reached
        .map(|_| ())
        .map_err(|_| SimError::Task("player stopped".to_string()))
}
