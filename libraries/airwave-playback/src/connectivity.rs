//! Network reachability
//!
//! The platform reports reachability changes to a [`NetworkMonitor`]; the
//! player service subscribes and folds every transition into the
//! controller's inbox, in order.

use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// Source of reachability transitions
pub trait ConnectivityMonitor: Send + Sync {
    /// Current reachability
    fn is_connected(&self) -> bool;

    /// Receive every subsequent transition, without coalescing
    fn subscribe(&self) -> mpsc::UnboundedReceiver<bool>;
}

struct MonitorState {
    connected: bool,
    subscribers: Vec<mpsc::UnboundedSender<bool>>,
}

/// Reachability fed by platform callbacks
pub struct NetworkMonitor {
    state: Mutex<MonitorState>,
}

impl NetworkMonitor {
    pub fn new(initially_connected: bool) -> Self {
        Self {
            state: Mutex::new(MonitorState {
                connected: initially_connected,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Record a reachability update
    ///
    /// Returns true if this was a transition. Repeated reports of the same
    /// value are not forwarded.
    pub fn set_connected(&self, connected: bool) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.connected == connected {
            return false;
        }

        state.connected = connected;
        state
            .subscribers
            .retain(|subscriber| subscriber.send(connected).is_ok());

        tracing::info!(
            "Network {}",
            if connected { "reachable" } else { "unreachable" }
        );
        true
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.subscribers.retain(|subscriber| !subscriber.is_closed());
        state.subscribers.len()
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityMonitor for NetworkMonitor {
    fn is_connected(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .connected
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<bool> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_delivered_in_order() {
        let monitor = NetworkMonitor::new(true);
        let mut rx = monitor.subscribe();

        assert!(monitor.set_connected(false));
        assert!(monitor.set_connected(true));
        assert!(monitor.set_connected(false));

        assert_eq!(rx.try_recv().unwrap(), false);
        assert_eq!(rx.try_recv().unwrap(), true);
        assert_eq!(rx.try_recv().unwrap(), false);
        assert!(!monitor.is_connected());
    }

    #[test]
    fn repeated_values_are_not_transitions() {
        let monitor = NetworkMonitor::new(true);
        let mut rx = monitor.subscribe();

        assert!(!monitor.set_connected(true));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_subscribers_are_pruned() {
        let monitor = NetworkMonitor::default();
        let rx = monitor.subscribe();
        let _kept = monitor.subscribe();
        assert_eq!(monitor.subscriber_count(), 2);

        drop(rx);
        monitor.set_connected(false);
        assert_eq!(monitor.subscriber_count(), 1);
    }
}
