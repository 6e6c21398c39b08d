//! Scenario scripts
//!
//! A script describes a small library (podcasts with episodes, radio
//! stations) and a list of steps to drive the player with. Scripts are TOML:
//!
//! ```toml
//! [[stations]]
//! id = "jazz"
//! title = "Jazz FM"
//! stream_url = "https://radio.example.com/jazz"
//!
//! [[steps]]
//! action = "play_station"
//! station = "jazz"
//!
//! [[steps]]
//! action = "expect_state"
//! state = "playing_station"
//! ```

use crate::error::{Result, SimError};
use airwave_playback::{RemoteCommand, StateKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const DEMO_SCRIPT: &str = include_str!("../scripts/demo.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Script {
    /// Network reachability when the player starts
    #[serde(default = "default_start_online")]
    pub start_online: bool,

    #[serde(default)]
    pub podcasts: Vec<PodcastEntry>,

    #[serde(default)]
    pub stations: Vec<StationEntry>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_start_online() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PodcastEntry {
    pub id: String,
    pub title: String,
    pub feed_url: Url,
    #[serde(default)]
    pub artwork_url: Option<Url>,
    #[serde(default)]
    pub episodes: Vec<EpisodeEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EpisodeEntry {
    pub id: String,
    pub title: String,
    pub audio_url: Url,
    #[serde(default)]
    pub local_file: Option<PathBuf>,
    #[serde(default)]
    pub artwork_url: Option<Url>,
    pub published_at: DateTime<Utc>,
    /// Duration the library already knows
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub progress: f64,
    /// Duration the simulated player reports after loading
    #[serde(default)]
    pub media_duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationEntry {
    pub id: String,
    pub title: String,
    pub stream_url: Url,
    #[serde(default)]
    pub artwork_url: Option<Url>,
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    PlayEpisode { episode: String },
    PlayStation { station: String },
    Toggle,
    Next,
    Previous,
    Seek { seconds: f64 },
    Remote { command: RemoteCommand },
    Offline,
    Online,
    /// The platform player stops receiving data
    Stall,
    /// The platform player reaches the end of the current item
    FinishItem,
    Unreachable { host: String },
    Reachable { host: String },
    AcknowledgeNotice,
    Wait { ms: u64 },
    ExpectState { state: StateKind },
}

impl Script {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let script: Self = toml::from_str(contents).map_err(|e| SimError::Script(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    /// Built-in commute scenario
    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SCRIPT)
    }

    pub fn demo_source() -> &'static str {
        DEMO_SCRIPT
    }

    /// Check that every step refers to something in the library
    fn validate(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::PlayEpisode { episode } if !self.has_episode(episode) => {
                    return Err(SimError::Script(format!(
                        "step {}: unknown episode '{episode}'",
                        index + 1
                    )));
                }
                Step::PlayStation { station } if !self.has_station(station) => {
                    return Err(SimError::Script(format!(
                        "step {}: unknown station '{station}'",
                        index + 1
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn has_episode(&self, id: &str) -> bool {
        self.podcasts
            .iter()
            .flat_map(|podcast| &podcast.episodes)
            .any(|episode| episode.id == id)
    }

    fn has_station(&self, id: &str) -> bool {
        self.stations.iter().any(|station| station.id == id)
    }
}
