//! Controller inbox messages
//!
//! Every input the controller reacts to arrives as a [`ControllerMessage`]
//! on a single queue, so commands, engine events, connectivity changes and
//! artwork results are handled strictly one at a time in arrival order.

use crate::engine::EngineEvent;
use crate::error::Result;
use crate::types::PlaybackState;
use airwave_artwork::ArtworkData;
use airwave_core::{Episode, Station};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;
use url::Url;

/// Remote transport command from the OS (headphones, lock screen, car)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemoteCommand {
    Play,
    Pause,
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    /// Seek to a position in seconds
    ChangePlaybackPosition(f64),
}

/// Result reported back to the OS for a remote command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteCommandStatus {
    Success,
    CommandFailed,
}

/// User intents
#[derive(Debug)]
pub enum PlayerCommand {
    /// Play an episode, optionally within an explicit ordered list
    PlayEpisode {
        episode: Episode,
        playlist: Option<Vec<Episode>>,
    },
    PlayStation(Station),
    TogglePlayPause,
    Next,
    Previous,
    Seek {
        seconds: f64,
        reply: Option<oneshot::Sender<Result<()>>>,
    },
    Remote {
        command: RemoteCommand,
        reply: Option<oneshot::Sender<RemoteCommandStatus>>,
    },
    /// Dismiss the pending notice
    AcknowledgeNotice,
}

/// Everything the controller's inbox carries
#[derive(Debug)]
pub enum ControllerMessage {
    Command(PlayerCommand),
    Engine(EngineEvent),
    /// Reachability transition
    Connectivity(bool),
    /// Background artwork fetch finished
    ArtworkLoaded {
        url: Url,
        artwork: Option<Arc<ArtworkData>>,
    },
    /// Progress tick
    Tick,
    /// Query the current state
    Inspect(oneshot::Sender<PlaybackState>),
    /// Tear down and stop the service
    Shutdown(oneshot::Sender<()>),
}

impl From<PlayerCommand> for ControllerMessage {
    fn from(command: PlayerCommand) -> Self {
        Self::Command(command)
    }
}
