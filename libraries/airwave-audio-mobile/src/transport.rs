//! Platform player surface

use crate::error::Result;
use airwave_core::MediaLocator;
use serde::{Deserialize, Serialize};

/// Identity the bridge assigns to each item it hands the platform player
pub type NativeItemId = u64;

/// Operations the platform player (AVPlayer, ExoPlayer) must provide
///
/// Implemented on the platform side of the FFI boundary. Events flow back
/// through [`NativeCallbacks`](crate::NativeCallbacks) tagged with the
/// item id passed to `replace_current_item`.
pub trait NativeTransport: Send {
    fn replace_current_item(&mut self, item: NativeItemId, locator: &MediaLocator) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    /// Elapsed time of the current item, in seconds
    fn current_time(&self) -> f64;
    /// Drop the current item
    fn clear(&mut self);
}

/// Transport status as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeStatus {
    Paused,
    WaitingToPlay,
    Playing,
}

impl NativeStatus {
    /// Map AVPlayer's `timeControlStatus` raw value
    pub fn from_time_control_status(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::Paused),
            1 => Some(Self::WaitingToPlay),
            2 => Some(Self::Playing),
            _ => None,
        }
    }

    /// Map ExoPlayer's `isPlaying` plus `playbackState` (STATE_BUFFERING = 2)
    pub fn from_exo_player(is_playing: bool, playback_state: i32) -> Self {
        if is_playing {
            Self::Playing
        } else if playback_state == 2 {
            Self::WaitingToPlay
        } else {
            Self::Paused
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn av_player_status_codes() {
        assert_eq!(NativeStatus::from_time_control_status(0), Some(NativeStatus::Paused));
        assert_eq!(
            NativeStatus::from_time_control_status(1),
            Some(NativeStatus::WaitingToPlay)
        );
        assert_eq!(NativeStatus::from_time_control_status(2), Some(NativeStatus::Playing));
        assert_eq!(NativeStatus::from_time_control_status(7), None);
    }

    #[test]
    fn exo_player_buffering_is_waiting() {
        assert_eq!(NativeStatus::from_exo_player(false, 2), NativeStatus::WaitingToPlay);
        assert_eq!(NativeStatus::from_exo_player(true, 2), NativeStatus::Playing);
        assert_eq!(NativeStatus::from_exo_player(false, 3), NativeStatus::Paused);
    }
}
