//! Artwork resolution for the now-playing entry
//!
//! Fetches happen off the controller; results come back through the inbox
//! as [`ControllerMessage::ArtworkLoaded`] and are applied only if that
//! artwork still belongs to the current source.

use crate::message::ControllerMessage;
use airwave_artwork::{ArtworkData, ArtworkLoader};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::debug;
use url::Url;

/// Artwork lookup used by the controller
pub trait ArtworkRequester: Send + Sync {
    /// Artwork already in memory
    fn cached(&self, url: &Url) -> Option<Arc<ArtworkData>>;

    /// Start loading `url` in the background
    fn request(&self, url: Url);
}

/// [`ArtworkRequester`] backed by an [`ArtworkLoader`]
pub struct LoaderRequester {
    loader: ArtworkLoader,
    inbox: mpsc::UnboundedSender<ControllerMessage>,
    in_flight: Arc<Mutex<HashSet<Url>>>,
}

impl LoaderRequester {
    pub fn new(loader: ArtworkLoader, inbox: mpsc::UnboundedSender<ControllerMessage>) -> Self {
        Self {
            loader,
            inbox,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl ArtworkRequester for LoaderRequester {
    fn cached(&self, url: &Url) -> Option<Arc<ArtworkData>> {
        self.loader.cached(url)
    }

    fn request(&self, url: Url) {
        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            if !in_flight.insert(url.clone()) {
                return;
            }
        }

        let loader = self.loader.clone();
        let inbox = self.inbox.clone();
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            let artwork = match loader.load(&url).await {
                Ok(artwork) => Some(artwork),
                Err(e) => {
                    debug!("Artwork {} unavailable: {}", url, e);
                    None
                }
            };

            in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&url);
            let _ = inbox.send(ControllerMessage::ArtworkLoaded { url, artwork });
        });
    }
}
