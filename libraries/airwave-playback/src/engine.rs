//! Media engine abstraction
//!
//! The platform media engine (AVPlayer, ExoPlayer, a test double) plays one
//! item at a time. Every load hands the engine an [`ItemObserver`] scoped to
//! that item; the controller keeps the matching [`ItemSubscription`]. When
//! the controller replaces or abandons the item it drops the subscription,
//! which silences the observer, so events from a previous item can never
//! reach the controller.

use crate::error::Result;
use crate::message::ControllerMessage;
use airwave_core::MediaLocator;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Monotonic identity of a loaded item
pub type ItemGeneration = u64;

/// Engine transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// Audio is being rendered
    Playing,
    /// Paused (by the controller, the OS, or an interruption)
    Paused,
    /// Rate is non-zero but the engine is waiting for data
    WaitingToPlay,
}

/// What happened to the current item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEventKind {
    /// Transport status changed
    StatusChanged(EngineStatus),
    /// Playback stalled waiting for data
    Stalled,
    /// The item played to its end
    ItemEnded,
    /// The item's duration became known, in seconds
    DurationResolved(f64),
}

/// Engine event tagged with the item it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineEvent {
    pub generation: ItemGeneration,
    pub kind: EngineEventKind,
}

/// Which per-item events the controller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedEvents {
    /// Deliver stalls (armed for live stations)
    pub stalls: bool,
    /// Deliver item-end (armed for episodes)
    pub item_end: bool,
}

impl ObservedEvents {
    /// Observation for on-demand episodes
    pub const EPISODE: Self = Self {
        stalls: false,
        item_end: true,
    };

    /// Observation for live stations
    pub const STATION: Self = Self {
        stalls: true,
        item_end: false,
    };
}

/// Platform media engine
///
/// Implementations must not call back into the controller synchronously;
/// events go through the [`ItemObserver`] handed to `load`.
pub trait PlaybackEngine: Send {
    /// Replace the current item
    ///
    /// The previous item's observer must not be used after this returns.
    fn load(&mut self, locator: &MediaLocator, observer: ItemObserver) -> Result<()>;

    /// Start or resume the current item
    fn play(&mut self);

    /// Pause the current item
    fn pause(&mut self);

    /// Seek the current item, in seconds
    fn seek(&mut self, seconds: f64);

    /// Elapsed time of the current item, in seconds
    fn elapsed(&self) -> f64;

    /// Release the current item
    fn stop(&mut self) {
        self.pause();
    }
}

/// Engine-side handle for reporting events about one item
#[derive(Debug, Clone)]
pub struct ItemObserver {
    generation: ItemGeneration,
    observed: ObservedEvents,
    active: Arc<AtomicBool>,
    inbox: mpsc::UnboundedSender<ControllerMessage>,
}

impl ItemObserver {
    /// Item this observer reports on
    pub fn generation(&self) -> ItemGeneration {
        self.generation
    }

    /// False once the controller has moved on to another item
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn status_changed(&self, status: EngineStatus) {
        self.emit(EngineEventKind::StatusChanged(status));
    }

    pub fn stalled(&self) {
        if self.observed.stalls {
            self.emit(EngineEventKind::Stalled);
        }
    }

    pub fn item_ended(&self) {
        if self.observed.item_end {
            self.emit(EngineEventKind::ItemEnded);
        }
    }

    pub fn duration_resolved(&self, seconds: f64) {
        self.emit(EngineEventKind::DurationResolved(seconds));
    }

    fn emit(&self, kind: EngineEventKind) {
        if !self.is_active() {
            tracing::trace!("Dropping {:?} for retired item {}", kind, self.generation);
            return;
        }

        let event = EngineEvent {
            generation: self.generation,
            kind,
        };
        if self.inbox.send(ControllerMessage::Engine(event)).is_err() {
            tracing::trace!("Controller gone, dropping {:?}", kind);
        }
    }
}

/// Controller-side registration for the current item
///
/// Dropping it retires the paired [`ItemObserver`].
#[derive(Debug)]
pub struct ItemSubscription {
    generation: ItemGeneration,
    active: Arc<AtomicBool>,
}

impl ItemSubscription {
    /// Create a subscription and the observer paired with it
    pub fn new(
        generation: ItemGeneration,
        observed: ObservedEvents,
        inbox: mpsc::UnboundedSender<ControllerMessage>,
    ) -> (Self, ItemObserver) {
        let active = Arc::new(AtomicBool::new(true));
        let observer = ItemObserver {
            generation,
            observed,
            active: Arc::clone(&active),
            inbox,
        };
        (Self { generation, active }, observer)
    }

    pub fn generation(&self) -> ItemGeneration {
        self.generation
    }
}

impl Drop for ItemSubscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next_event(rx: &mut mpsc::UnboundedReceiver<ControllerMessage>) -> Option<EngineEvent> {
        match rx.try_recv().ok()? {
            ControllerMessage::Engine(event) => Some(event),
            _ => None,
        }
    }

    #[test]
    fn observer_delivers_tagged_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_subscription, observer) = ItemSubscription::new(7, ObservedEvents::EPISODE, tx);

        observer.status_changed(EngineStatus::Playing);
        observer.duration_resolved(300.0);

        assert_eq!(
            next_event(&mut rx),
            Some(EngineEvent {
                generation: 7,
                kind: EngineEventKind::StatusChanged(EngineStatus::Playing)
            })
        );
        assert_eq!(
            next_event(&mut rx).map(|e| e.kind),
            Some(EngineEventKind::DurationResolved(300.0))
        );
    }

    #[test]
    fn dropping_subscription_silences_observer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (subscription, observer) = ItemSubscription::new(1, ObservedEvents::EPISODE, tx);

        drop(subscription);
        observer.item_ended();

        assert!(!observer.is_active());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unarmed_events_are_filtered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_episode_sub, episode_observer) =
            ItemSubscription::new(1, ObservedEvents::EPISODE, tx.clone());
        let (_station_sub, station_observer) =
            ItemSubscription::new(2, ObservedEvents::STATION, tx);

        episode_observer.stalled();
        station_observer.item_ended();
        assert!(rx.try_recv().is_err());

        station_observer.stalled();
        assert_eq!(next_event(&mut rx).map(|e| e.kind), Some(EngineEventKind::Stalled));
    }
}
