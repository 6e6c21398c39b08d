//! Airwave - Mobile Audio Bridge
//!
//! Adapts the platform media player and path monitor to the traits
//! `airwave-playback` drives:
//!
//! - [`NativeTransport`] is implemented on the platform side (AVPlayer on
//!   iOS, ExoPlayer on Android) and wrapped in a [`NativeEngine`]
//! - Player callbacks enter through [`NativeCallbacks`], keyed by the item
//!   id the engine assigned, so reports about replaced items are dropped
//! - Path monitor updates enter through [`ReachabilityBridge`]
//!
//! [`SimulatedTransport`] stands in for the platform player when running
//! on a desktop.

mod callbacks;
mod connectivity;
mod engine;
mod error;
mod simulated;
mod transport;

pub use callbacks::NativeCallbacks;
pub use connectivity::{PathStatus, ReachabilityBridge};
pub use engine::NativeEngine;
pub use error::{MobileAudioError, Result};
pub use simulated::{SimulatedControls, SimulatedTransport};
pub use transport::{NativeItemId, NativeStatus, NativeTransport};
