//! Player configuration

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Progress tick interval in milliseconds (default: 1000)
    pub tick_interval_ms: u64,

    /// Episodes with this many seconds or less remaining start over (default: 10)
    pub restart_threshold_secs: f64,

    /// Notice shown when a play intent needs the network (default: "No Internet Connection")
    pub offline_notice: String,

    /// Number of artwork images kept in memory (default: 64)
    pub artwork_cache_size: usize,

    /// Timeout for remote artwork requests in seconds (default: 15)
    pub artwork_timeout_secs: u64,

    /// Largest artwork accepted, in bytes (default: 5 MiB)
    pub max_artwork_bytes: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            restart_threshold_secs: 10.0,
            offline_notice: "No Internet Connection".to_string(),
            artwork_cache_size: 64,
            artwork_timeout_secs: 15,
            max_artwork_bytes: 5 * 1024 * 1024,
        }
    }
}

impl PlayerConfig {
    /// Progress tick interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Artwork request timeout
    pub fn artwork_timeout(&self) -> Duration {
        Duration::from_secs(self.artwork_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        if !self.restart_threshold_secs.is_finite() || self.restart_threshold_secs < 0.0 {
            return Err(PlaybackError::Config(format!(
                "restart_threshold_secs must be a non-negative number, got {}",
                self.restart_threshold_secs
            )));
        }

        Ok(())
    }
}
