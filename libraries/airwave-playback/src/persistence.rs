//! Fire-and-forget progress persistence
//!
//! The controller records progress synchronously through
//! [`ProgressPersister`]; [`PersistenceWorker`] performs the writes on a
//! background task so the controller never waits on storage. Write
//! failures are logged and dropped.

use airwave_core::{EpisodeId, ProgressStore};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Sink for progress and duration updates
pub trait ProgressPersister: Send + Sync {
    /// Record the resume position of an episode, in seconds
    fn save_progress(&self, episode: &EpisodeId, seconds: f64);

    /// Record a newly learned duration, in seconds
    fn save_duration(&self, episode: &EpisodeId, seconds: f64);
}

#[derive(Debug)]
enum PersistRequest {
    Progress(EpisodeId, f64),
    Duration(EpisodeId, f64),
}

/// Background writer over a [`ProgressStore`]
pub struct PersistenceWorker;

impl PersistenceWorker {
    /// Spawn the writer task
    ///
    /// The task drains every queued write and exits once all
    /// [`PersisterHandle`]s are dropped; await the returned handle to flush.
    pub fn spawn(store: Arc<dyn ProgressStore>) -> (PersisterHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<PersistRequest>();

        let task = tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let result = match &request {
                    PersistRequest::Progress(id, seconds) => store.save_progress(id, *seconds).await,
                    PersistRequest::Duration(id, seconds) => store.save_duration(id, *seconds).await,
                };

                if let Err(e) = result {
                    warn!("Failed to persist {:?}: {}", request, e);
                }
            }
            debug!("Persistence worker finished");
        });

        (PersisterHandle { tx }, task)
    }
}

/// Cloneable sender side of the [`PersistenceWorker`]
#[derive(Clone)]
pub struct PersisterHandle {
    tx: mpsc::UnboundedSender<PersistRequest>,
}

impl PersisterHandle {
    fn send(&self, request: PersistRequest) {
        if let Err(e) = self.tx.send(request) {
            warn!("Persistence worker stopped, dropping {:?}", e.0);
        }
    }
}

impl ProgressPersister for PersisterHandle {
    fn save_progress(&self, episode: &EpisodeId, seconds: f64) {
        self.send(PersistRequest::Progress(episode.clone(), seconds));
    }

    fn save_duration(&self, episode: &EpisodeId, seconds: f64) {
        self.send(PersistRequest::Duration(episode.clone(), seconds));
    }
}
