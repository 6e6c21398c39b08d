/// Simulator configuration
use crate::error::{Result, SimError};
use airwave_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Script to run when none is given on the command line
    #[serde(default)]
    pub script: Option<PathBuf>,

    /// Log every UI snapshot change
    #[serde(default = "default_log_snapshots")]
    pub log_snapshots: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            script: None,
            log_snapshots: default_log_snapshots(),
        }
    }
}

fn default_log_snapshots() -> bool {
    true
}

impl SimConfig {
    /// Load configuration from file and environment
    ///
    /// Without an explicit path, `airwave.toml` in the working directory is
    /// used when present. Environment variables prefixed with `AIRWAVE_`
    /// override file values, with `__` between section and key
    /// (`AIRWAVE_PLAYER__TICK_INTERVAL_MS=500`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("airwave.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("AIRWAVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| SimError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SimError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))
    }
}
