//! Airwave Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling for Airwave.
//!
//! This crate provides the foundational building blocks shared by the playback
//! controller, the mobile engine bridge, and the applications.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Episode`, `Podcast`, `Station`, `MediaSource`, `MediaLocator`
//! - **Collaborator Traits**: `EpisodeCatalog` (library reads), `ProgressStore` (progress writes)
//! - **Error Handling**: Unified `AirwaveError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use airwave_core::types::{Episode, Podcast, Station};
//! use url::Url;
//!
//! let podcast = Podcast::new("Daily Show", Url::parse("https://example.com/feed.xml").unwrap());
//!
//! let episode = Episode::new("Pilot", Url::parse("https://example.com/pilot.mp3").unwrap())
//!     .with_podcast(podcast.id.clone())
//!     .with_duration(1800.0);
//!
//! let station = Station::new("Jazz FM", Url::parse("https://radio.example.com/jazz").unwrap());
//!
//! assert_eq!(episode.resume_position(10.0), 0.0);
//! assert!(station.locator().is_remote());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AirwaveError, Result};
pub use traits::{EpisodeCatalog, ProgressStore};

pub use types::{
    Episode, EpisodeId, MediaLocator, MediaSource, Podcast, PodcastId, Station, StationId,
};
