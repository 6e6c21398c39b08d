//! Error types for the native bridge

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobileAudioError {
    /// The platform player rejected the item
    #[error("Native player error: {0}")]
    Transport(String),

    /// The locator cannot be opened by this platform
    #[error("Unsupported locator: {0}")]
    UnsupportedLocator(String),
}

pub type Result<T> = std::result::Result<T, MobileAudioError>;
