//! Reachability callbacks from the platform path monitor

use airwave_playback::NetworkMonitor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Path status from NWPathMonitor / ConnectivityManager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStatus {
    Satisfied,
    Unsatisfied,
    /// A connection could be established on demand (VPN, captive portal)
    RequiresConnection,
}

impl PathStatus {
    /// Only a satisfied path counts as reachable
    pub fn is_reachable(self) -> bool {
        self == Self::Satisfied
    }
}

/// Feeds platform path updates into a [`NetworkMonitor`]
#[derive(Clone)]
pub struct ReachabilityBridge {
    monitor: Arc<NetworkMonitor>,
}

impl ReachabilityBridge {
    pub fn new(monitor: Arc<NetworkMonitor>) -> Self {
        Self { monitor }
    }

    /// Returns true if reachability changed
    pub fn on_path_update(&self, status: PathStatus) -> bool {
        self.monitor.set_connected(status.is_reachable())
    }

    pub fn monitor(&self) -> &Arc<NetworkMonitor> {
        &self.monitor
    }
}
