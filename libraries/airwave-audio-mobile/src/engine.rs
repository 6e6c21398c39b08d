//! [`PlaybackEngine`] over a platform player

use crate::callbacks::NativeCallbacks;
use crate::transport::{NativeItemId, NativeTransport};
use airwave_core::MediaLocator;
use airwave_playback::{ItemObserver, PlaybackEngine, PlaybackError};
use tracing::debug;

/// Media engine backed by a [`NativeTransport`]
pub struct NativeEngine<T> {
    transport: T,
    callbacks: NativeCallbacks,
    last_item: NativeItemId,
}

impl<T: NativeTransport> NativeEngine<T> {
    /// `callbacks` must be the same instance the platform reports into
    pub fn new(transport: T, callbacks: NativeCallbacks) -> Self {
        Self {
            transport,
            callbacks,
            last_item: 0,
        }
    }
}

impl<T: NativeTransport> PlaybackEngine for NativeEngine<T> {
    fn load(
        &mut self,
        locator: &MediaLocator,
        observer: ItemObserver,
    ) -> airwave_playback::Result<()> {
        self.last_item += 1;
        let item = self.last_item;

        // Route before handing over; platforms may report synchronously
        self.callbacks.register(item, observer);

        if let Err(e) = self.transport.replace_current_item(item, locator) {
            self.callbacks.clear();
            return Err(PlaybackError::locator_load(locator, e.to_string()));
        }

        debug!("Native item {} is {}", item, locator);
        Ok(())
    }

    fn play(&mut self) {
        self.transport.play();
    }

    fn pause(&mut self) {
        self.transport.pause();
    }

    fn seek(&mut self, seconds: f64) {
        self.transport.seek(seconds);
    }

    fn elapsed(&self) -> f64 {
        let elapsed = self.transport.current_time();
        if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            0.0
        }
    }

    fn stop(&mut self) {
        self.callbacks.clear();
        self.transport.clear();
    }
}
