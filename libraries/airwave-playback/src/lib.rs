//! Airwave - Playback Control
//!
//! Drives a single platform media engine for podcast episodes and live radio
//! stations, and keeps it consistent with network reachability.
//!
//! This crate provides:
//! - A deterministic playback state machine ([`PlaybackController`])
//! - Playlist derivation with newest-first ordering
//! - Resume positions with a near-end restart threshold
//! - Progress and duration persistence without blocking
//! - Stall buffering and automatic reload when the network returns
//! - Now-playing metadata and OS remote command handling
//!
//! # Architecture
//!
//! The controller is a plain struct driven through `&mut self`. At runtime
//! [`PlayerService`] owns it on a tokio task and feeds it from a single
//! inbox, so user intents, engine events and reachability transitions are
//! handled one at a time in arrival order. Platform code is plugged in
//! through traits:
//!
//! - [`PlaybackEngine`] - the media engine (AVPlayer, ExoPlayer, ...)
//! - [`ConnectivityMonitor`] - network reachability
//! - [`NowPlayingPublisher`] - lock screen / media session metadata
//! - [`ProgressPersister`] - where resume positions go
//!
//! # Example
//!
//! ```rust,no_run
//! use airwave_playback::{
//!     NetworkMonitor, PersistenceWorker, PlayerConfig, PlayerParts, PlayerService,
//! };
//! # use airwave_playback::{PlaybackEngine, NowPlayingPublisher};
//! # use airwave_core::{EpisodeCatalog, ProgressStore, Station};
//! # use std::sync::Arc;
//! # async fn example(
//! #     engine: Box<dyn PlaybackEngine>,
//! #     catalog: Arc<dyn EpisodeCatalog>,
//! #     store: Arc<dyn ProgressStore>,
//! #     publisher: Arc<dyn NowPlayingPublisher>,
//! #     station: Station,
//! # ) -> airwave_playback::Result<()> {
//! let monitor = NetworkMonitor::new(true);
//! let (persister, writer) = PersistenceWorker::spawn(store);
//!
//! let (player, task) = PlayerService::spawn(
//!     PlayerConfig::default(),
//!     PlayerParts {
//!         engine,
//!         catalog,
//!         persister: Arc::new(persister),
//!         publisher,
//!     },
//!     &monitor,
//! )?;
//!
//! player.play_station(station)?;
//! monitor.set_connected(false); // platform reachability callback
//!
//! player.shutdown().await?;
//! # let _ = (task, writer);
//! # Ok(())
//! # }
//! ```

pub mod artwork;
pub mod config;
pub mod connectivity;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod message;
pub mod now_playing;
pub mod persistence;
pub mod playlist;
pub mod service;
pub mod types;

pub use artwork::{ArtworkRequester, LoaderRequester};
pub use config::PlayerConfig;
pub use connectivity::{ConnectivityMonitor, NetworkMonitor};
pub use controller::{Collaborators, PlaybackController};
pub use engine::{
    EngineEvent, EngineEventKind, EngineStatus, ItemGeneration, ItemObserver, ItemSubscription,
    ObservedEvents, PlaybackEngine,
};
pub use error::{PlaybackError, Result};
pub use events::{PlayerEvent, PlayerSnapshot};
pub use message::{ControllerMessage, PlayerCommand, RemoteCommand, RemoteCommandStatus};
pub use now_playing::{NowPlayingArtwork, NowPlayingInfo, NowPlayingPublisher};
pub use persistence::{PersistenceWorker, PersisterHandle, ProgressPersister};
pub use playlist::PlaylistManager;
pub use service::{PlayerHandle, PlayerParts, PlayerService};
pub use types::{PendingPlay, PlaybackState, Playlist, StateKind};
