//! Player service tests
//!
//! Run the controller on its own task with a paused clock, so progress
//! ticks are driven by virtual time.

mod common;

use airwave_core::PodcastId;
use airwave_playback::{
    NetworkMonitor, PlaybackError, PlayerConfig, PlayerEvent, PlayerHandle, PlayerParts,
    PlayerService, RemoteCommand, RemoteCommandStatus, StateKind,
};
use common::{episode, station, FakeEngine, MemoryCatalog, RecordingPersister, RecordingPublisher};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

// ===== Test Helpers =====

struct Running {
    player: PlayerHandle,
    task: JoinHandle<()>,
    engine: FakeEngine,
    catalog: Arc<MemoryCatalog>,
    persister: Arc<RecordingPersister>,
    publisher: Arc<RecordingPublisher>,
}

fn start(monitor: &NetworkMonitor) -> Running {
    let engine = FakeEngine::default();
    let catalog = Arc::new(MemoryCatalog::default());
    let persister = Arc::new(RecordingPersister::default());
    let publisher = Arc::new(RecordingPublisher::default());

    let (player, task) = PlayerService::spawn(
        PlayerConfig::default(),
        PlayerParts {
            engine: Box::new(engine.clone()),
            catalog: catalog.clone(),
            persister: persister.clone(),
            publisher: publisher.clone(),
        },
        monitor,
    )
    .unwrap();

    Running {
        player,
        task,
        engine,
        catalog,
        persister,
        publisher,
    }
}

// ===== Service =====

#[tokio::test(start_paused = true)]
async fn ticks_persist_progress_once_per_change() {
    let monitor = NetworkMonitor::new(true);
    let running = start(&monitor);
    let ep = episode("a", &PodcastId::new("pod"), 1);

    running.player.play_episode(ep).unwrap();
    assert_eq!(
        running.player.state().await.unwrap().kind(),
        StateKind::PlayingEpisode
    );

    running.engine.set_elapsed(5.0);
    tokio::time::sleep(Duration::from_millis(3500)).await;

    assert_eq!(running.persister.progress_writes(), vec![5.0]);
    assert_eq!(running.player.snapshot().current_time, 5.0);
}

#[tokio::test(start_paused = true)]
async fn connectivity_transitions_reach_controller() {
    let monitor = NetworkMonitor::new(true);
    let running = start(&monitor);

    running.player.play_station(station("Jazz FM")).unwrap();
    running.player.state().await.unwrap();

    monitor.set_connected(false);
    tokio::time::sleep(Duration::from_millis(10)).await;
    running.engine.observer().stalled();
    assert_eq!(
        running.player.state().await.unwrap().kind(),
        StateKind::BufferingStation
    );

    monitor.set_connected(true);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(
        running.player.state().await.unwrap().kind(),
        StateKind::PlayingStation
    );
    assert_eq!(running.engine.loads(), 2);
}

#[tokio::test]
async fn offline_start_is_respected() {
    let monitor = NetworkMonitor::new(false);
    let running = start(&monitor);
    let mut events = running.player.subscribe();

    running.player.play_station(station("Jazz FM")).unwrap();
    let state = running.player.state().await.unwrap();

    assert_eq!(state.kind(), StateKind::AwaitingConnectivity);
    assert_eq!(running.engine.loads(), 0);

    let snapshot = running.player.snapshot();
    assert!(!snapshot.connected);
    assert_eq!(snapshot.notice.as_deref(), Some("No Internet Connection"));

    let mut saw_notice = false;
    while let Ok(event) = events.try_recv() {
        if matches!(event, PlayerEvent::Notice { .. }) {
            saw_notice = true;
        }
    }
    assert!(saw_notice);
}

#[tokio::test]
async fn seek_and_remote_commands_reply() {
    let monitor = NetworkMonitor::new(true);
    let running = start(&monitor);

    assert!(matches!(
        running.player.seek(10.0).await,
        Err(PlaybackError::SeekUnsupported(_))
    ));

    let podcast = PodcastId::new("pod");
    let ep = episode("a", &podcast, 1);
    running.catalog.insert(&podcast, vec![ep.clone()]);
    running.player.play_episode(ep).unwrap();

    running.player.seek(42.0).await.unwrap();
    assert_eq!(running.persister.progress_writes(), vec![42.0]);

    let status = running
        .player
        .remote(RemoteCommand::TogglePlayPause)
        .await
        .unwrap();
    assert_eq!(status, RemoteCommandStatus::Success);
    assert_eq!(
        running.player.state().await.unwrap().kind(),
        StateKind::PausedEpisode
    );
}

#[tokio::test]
async fn shutdown_tears_down_and_stops() {
    let monitor = NetworkMonitor::new(true);
    let running = start(&monitor);
    let ep = episode("a", &PodcastId::new("pod"), 1);

    running.player.play_episode(ep).unwrap();
    running.player.state().await.unwrap();
    running.engine.set_elapsed(17.0);

    running.player.shutdown().await.unwrap();
    running.task.await.unwrap();

    assert_eq!(running.persister.progress_writes(), vec![17.0]);
    assert_eq!(
        running.publisher.published.lock().unwrap().last(),
        Some(&None)
    );
    assert!(matches!(
        running.player.toggle(),
        Err(PlaybackError::ControllerClosed)
    ));
    assert_eq!(monitor.subscriber_count(), 0);
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let monitor = NetworkMonitor::new(true);
    let result = PlayerService::spawn(
        PlayerConfig {
            tick_interval_ms: 0,
            ..PlayerConfig::default()
        },
        PlayerParts {
            engine: Box::new(FakeEngine::default()),
            catalog: Arc::new(MemoryCatalog::default()),
            persister: Arc::new(RecordingPersister::default()),
            publisher: Arc::new(RecordingPublisher::default()),
        },
        &monitor,
    );

    assert!(matches!(result, Err(PlaybackError::Config(_))));
}
