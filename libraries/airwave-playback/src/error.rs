//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The engine could not open a media locator
    #[error("Failed to load {locator}: {reason}")]
    LocatorLoad { locator: String, reason: String },

    /// Current source has no seekable position
    #[error("Seeking is not supported for {0}")]
    SeekUnsupported(&'static str),

    /// Invalid seek position
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// The controller task has stopped
    #[error("Player controller is not running")]
    ControllerClosed,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Domain errors from airwave-core
    #[error(transparent)]
    Core(#[from] airwave_core::AirwaveError),
}

impl PlaybackError {
    /// Create a locator load error
    pub fn locator_load(locator: impl ToString, reason: impl Into<String>) -> Self {
        Self::LocatorLoad {
            locator: locator.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
