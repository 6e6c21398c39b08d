//! Now-playing surface that writes to the log

use airwave_playback::{NowPlayingArtwork, NowPlayingInfo, NowPlayingPublisher};
use std::sync::{Mutex, PoisonError};
use tracing::info;

#[derive(Default)]
struct Published {
    count: usize,
    last: Option<NowPlayingInfo>,
}

/// Logs every now-playing update instead of driving a lock screen
#[derive(Default)]
pub struct LogPublisher {
    published: Mutex<Published>,
}

impl LogPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of updates received, clears included
    pub fn count(&self) -> usize {
        self.lock().count
    }

    pub fn last(&self) -> Option<NowPlayingInfo> {
        self.lock().last.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Published> {
        self.published.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NowPlayingPublisher for LogPublisher {
    fn publish(&self, info: Option<NowPlayingInfo>) {
        match &info {
            Some(info) => {
                let artwork = match &info.artwork {
                    Some(NowPlayingArtwork::Image(data)) => data.mime_type.clone(),
                    Some(NowPlayingArtwork::Locator(url)) => url.to_string(),
                    None => "none".to_string(),
                };
                info!(
                    title = %info.title,
                    elapsed = info.elapsed,
                    total = info.total,
                    live = info.is_live_stream,
                    rate = info.playback_rate,
                    artwork = %artwork,
                    "Now playing"
                );
            }
            None => info!("Now playing cleared"),
        }

        let mut published = self.lock();
        published.count += 1;
        published.last = info;
    }
}
