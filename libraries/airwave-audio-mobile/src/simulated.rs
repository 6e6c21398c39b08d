//! In-process stand-in for a platform player
//!
//! Behaves like AVPlayer from the bridge's point of view: status changes are
//! reported after play/pause, durations after load, and the host can inject
//! stalls, item ends and unreachable hosts.

use crate::callbacks::NativeCallbacks;
use crate::error::{MobileAudioError, Result};
use crate::transport::{NativeItemId, NativeStatus, NativeTransport};
use airwave_core::MediaLocator;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

#[derive(Default)]
struct SimState {
    item: Option<(NativeItemId, MediaLocator)>,
    offset: f64,
    playing_since: Option<Instant>,
    durations: HashMap<MediaLocator, f64>,
    unreachable_hosts: HashSet<String>,
}

impl SimState {
    fn position(&self) -> f64 {
        let running = self
            .playing_since
            .map_or(0.0, |since| since.elapsed().as_secs_f64());
        self.offset + running
    }
}

/// Simulated platform player
pub struct SimulatedTransport {
    state: Arc<Mutex<SimState>>,
    callbacks: NativeCallbacks,
}

impl SimulatedTransport {
    pub fn new(callbacks: NativeCallbacks) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState::default())),
            callbacks,
        }
    }

    /// Handle for injecting platform behaviour
    pub fn controls(&self) -> SimulatedControls {
        SimulatedControls {
            state: Arc::clone(&self.state),
            callbacks: self.callbacks.clone(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_item(&self) -> Option<NativeItemId> {
        self.lock().item.as_ref().map(|(item, _)| *item)
    }
}

impl NativeTransport for SimulatedTransport {
    fn replace_current_item(&mut self, item: NativeItemId, locator: &MediaLocator) -> Result<()> {
        let duration = {
            let mut state = self.lock();
            if let MediaLocator::Remote(url) = locator {
                if let Some(host) = url.host_str() {
                    if state.unreachable_hosts.contains(host) {
                        return Err(MobileAudioError::Transport(format!(
                            "cannot reach {host}"
                        )));
                    }
                }
            }
            state.item = Some((item, locator.clone()));
            state.offset = 0.0;
            state.playing_since = None;
            state.durations.get(locator).copied()
        };

        if let Some(seconds) = duration {
            self.callbacks.on_duration(item, seconds);
        }
        Ok(())
    }

    fn play(&mut self) {
        let item = {
            let mut state = self.lock();
            if state.playing_since.is_none() {
                state.playing_since = Some(Instant::now());
            }
            state.item.as_ref().map(|(item, _)| *item)
        };
        if let Some(item) = item {
            self.callbacks.on_status(item, NativeStatus::Playing);
        }
    }

    fn pause(&mut self) {
        {
            let mut state = self.lock();
            state.offset = state.position();
            state.playing_since = None;
        }
        if let Some(item) = self.current_item() {
            self.callbacks.on_status(item, NativeStatus::Paused);
        }
    }

    fn seek(&mut self, seconds: f64) {
        let mut state = self.lock();
        state.offset = seconds;
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
    }

    fn current_time(&self) -> f64 {
        self.lock().position()
    }

    fn clear(&mut self) {
        let mut state = self.lock();
        state.item = None;
        state.offset = 0.0;
        state.playing_since = None;
    }
}

/// Host-side controls for a [`SimulatedTransport`]
#[derive(Clone)]
pub struct SimulatedControls {
    state: Arc<Mutex<SimState>>,
    callbacks: NativeCallbacks,
}

impl SimulatedControls {
    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_item(&self) -> Option<NativeItemId> {
        self.lock().item.as_ref().map(|(item, _)| *item)
    }

    /// Duration reported when `locator` is loaded
    pub fn set_duration(&self, locator: MediaLocator, seconds: f64) {
        self.lock().durations.insert(locator, seconds);
    }

    /// Make loads from `host` fail
    pub fn set_unreachable(&self, host: &str, unreachable: bool) {
        let mut state = self.lock();
        if unreachable {
            state.unreachable_hosts.insert(host.to_string());
        } else {
            state.unreachable_hosts.remove(host);
        }
    }

    /// Report a stall on the current item
    pub fn stall(&self) {
        if let Some(item) = self.current_item() {
            self.callbacks.on_status(item, NativeStatus::WaitingToPlay);
            self.callbacks.on_stalled(item);
        }
    }

    /// Report that the current item played to its end
    pub fn finish_item(&self) {
        let item = {
            let mut state = self.lock();
            state.offset = state.position();
            state.playing_since = None;
            state.item.as_ref().map(|(item, _)| *item)
        };
        if let Some(item) = item {
            self.callbacks.on_status(item, NativeStatus::Paused);
            self.callbacks.on_played_to_end(item);
        }
    }

    /// Jump the current position, in seconds
    pub fn set_position(&self, seconds: f64) {
        let mut state = self.lock();
        state.offset = seconds;
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
    }

    /// Locator of the item currently loaded
    pub fn loaded(&self) -> Option<MediaLocator> {
        self.lock().item.as_ref().map(|(_, locator)| locator.clone())
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing_since.is_some()
    }
}
