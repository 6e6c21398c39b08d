//! Platform-to-controller event routing

use crate::transport::{NativeItemId, NativeStatus};
use airwave_playback::{EngineStatus, ItemObserver};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Entry points the platform calls when its player reports something
///
/// Only the item most recently loaded by [`NativeEngine`](crate::NativeEngine)
/// is routed; callbacks for any other item id are dropped.
#[derive(Clone, Default)]
pub struct NativeCallbacks {
    current: Arc<Mutex<Option<(NativeItemId, ItemObserver)>>>,
}

impl NativeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, item: NativeItemId, observer: ItemObserver) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some((item, observer));
    }

    pub(crate) fn clear(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Item currently routed, if any
    pub fn current_item(&self) -> Option<NativeItemId> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(item, _)| *item)
    }

    pub fn on_status(&self, item: NativeItemId, status: NativeStatus) {
        let status = match status {
            NativeStatus::Paused => EngineStatus::Paused,
            NativeStatus::WaitingToPlay => EngineStatus::WaitingToPlay,
            NativeStatus::Playing => EngineStatus::Playing,
        };
        self.route(item, |observer| observer.status_changed(status));
    }

    /// Playback stalled (`AVPlayerItemPlaybackStalled`)
    pub fn on_stalled(&self, item: NativeItemId) {
        self.route(item, ItemObserver::stalled);
    }

    /// Item reached its end (`AVPlayerItemDidPlayToEndTime`)
    pub fn on_played_to_end(&self, item: NativeItemId) {
        self.route(item, ItemObserver::item_ended);
    }

    /// Asset duration loaded, in seconds
    ///
    /// Live streams report an indefinite duration, which is not forwarded.
    pub fn on_duration(&self, item: NativeItemId, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            trace!("Item {} has no finite duration", item);
            return;
        }
        self.route(item, |observer| observer.duration_resolved(seconds));
    }

    fn route(&self, item: NativeItemId, deliver: impl FnOnce(&ItemObserver)) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some((current_item, observer)) if *current_item == item => deliver(observer),
            _ => trace!("Dropping callback for replaced item {}", item),
        }
    }
}
