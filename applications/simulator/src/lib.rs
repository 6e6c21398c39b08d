//! Airwave Simulator
//!
//! Runs the Airwave player against a simulated platform audio stack, driven
//! by TOML scenario scripts. Used to exercise reachability loss, stalls and
//! playlist advancement without a device.
//!
//! This library exposes the runner for testing purposes.

pub mod config;
pub mod error;
pub mod library;
pub mod publisher;
pub mod runner;
pub mod script;

pub use config::{SimConfig, SimulationSettings};
pub use error::{Result, SimError};
pub use library::{EpisodeProgress, Library};
pub use publisher::LogPublisher;
pub use runner::{RunSummary, Runner};
pub use script::{Script, Step};
