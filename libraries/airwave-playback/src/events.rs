//! Player Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - State changes (play/pause/buffering/awaiting network)
//! - Source changes (new episode or station loaded)
//! - Connectivity transitions
//! - Position updates (periodic, while playing)

use crate::types::StateKind;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback state changed
    StateChanged {
        /// The new state
        state: StateKind,
    },

    /// A new source became current
    SourceChanged {
        /// Display title of the source
        title: String,
        /// Whether the source is a live stream
        is_live: bool,
    },

    /// Position update (once per progress tick while playing)
    PositionUpdate {
        /// Elapsed time in seconds
        position_secs: f64,
        /// Total duration in seconds (`None` for live streams or unknown)
        duration_secs: Option<f64>,
    },

    /// Network reachability changed
    ConnectivityChanged {
        /// Whether the network is reachable
        connected: bool,
    },

    /// A user-facing notice was raised
    Notice {
        /// Notice text
        message: String,
    },

    /// An error occurred
    Error {
        /// Error message
        message: String,
    },
}

/// Snapshot of what the UI should show
///
/// Published through a `tokio::sync::watch` channel after every message the
/// controller handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Current state kind
    pub state: StateKind,

    /// Title of the displayed source
    pub title: Option<String>,

    /// Whether the displayed source is a live stream
    pub is_live: bool,

    /// Whether audio is actually playing
    pub is_playing: bool,

    /// Elapsed time in seconds
    pub current_time: f64,

    /// Total time in seconds, when known
    pub total_time: Option<f64>,

    /// Whether the network is reachable
    pub connected: bool,

    /// Pending user-facing notice
    pub notice: Option<String>,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            state: StateKind::Idle,
            title: None,
            is_live: false,
            is_playing: false,
            current_time: 0.0,
            total_time: None,
            connected: true,
            notice: None,
        }
    }
}
