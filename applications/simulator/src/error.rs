//! Simulator error types

use airwave_playback::{PlaybackError, StateKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid script: {0}")]
    Script(String),

    #[error("Unknown episode: {0}")]
    UnknownEpisode(String),

    #[error("Unknown station: {0}")]
    UnknownStation(String),

    #[error("Step {step}: expected {expected}, player is {actual}")]
    Expectation {
        step: usize,
        expected: StateKind,
        actual: StateKind,
    },

    #[error("Player task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
