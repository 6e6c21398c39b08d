use crate::error::{ArtworkError, Result};
use crate::types::ArtworkData;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Maximum artwork size (5MB)
const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Default timeout for remote artwork requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Loads artwork from disk or network with LRU caching
///
/// Cloning is cheap; clones share the same cache and HTTP client.
#[derive(Clone)]
pub struct ArtworkLoader {
    cache: Arc<Mutex<LruCache<Url, Arc<ArtworkData>>>>,
    http: reqwest::Client,
    max_bytes: usize,
}

impl ArtworkLoader {
    /// Create a new artwork loader with the specified cache size
    ///
    /// # Arguments
    /// * `cache_size` - Maximum number of images to cache (0 keeps a single entry)
    pub fn new(cache_size: usize) -> Self {
        Self::with_timeout(cache_size, DEFAULT_TIMEOUT)
    }

    /// Create a loader whose remote requests give up after `timeout`
    pub fn with_timeout(cache_size: usize, timeout: Duration) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("Airwave/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client for artwork: {}", e);
                reqwest::Client::new()
            });

        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            http,
            max_bytes: MAX_ARTWORK_SIZE,
        }
    }

    /// Override the maximum accepted image size in bytes
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Look up artwork without touching disk or network
    pub fn cached(&self, url: &Url) -> Option<Arc<ArtworkData>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(url).cloned()
    }

    /// Load artwork, serving from the cache when possible
    pub async fn load(&self, url: &Url) -> Result<Arc<ArtworkData>> {
        if let Some(cached) = self.cached(url) {
            return Ok(cached);
        }

        let artwork = match url.scheme() {
            "file" => self.read_file(url).await?,
            "http" | "https" => self.fetch(url).await?,
            _ => return Err(ArtworkError::UnsupportedUrl(url.to_string())),
        };

        let artwork = Arc::new(artwork);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.put(url.clone(), Arc::clone(&artwork));
        Ok(artwork)
    }

    /// Number of cached images
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.clear();
    }

    async fn read_file(&self, url: &Url) -> Result<ArtworkData> {
        let path = url
            .to_file_path()
            .map_err(|()| ArtworkError::UnsupportedUrl(url.to_string()))?;

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ArtworkError::FileNotFound(path));
        }

        let data = tokio::fs::read(&path).await?;
        self.check_size(data.len())?;

        debug!(path = %path.display(), bytes = data.len(), "Loaded local artwork");
        Ok(ArtworkData::from_bytes(data))
    }

    async fn fetch(&self, url: &Url) -> Result<ArtworkData> {
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            self.check_size(length as usize)?;
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| value.starts_with("image/"))
            .map(str::to_string);

        let data = response.bytes().await?.to_vec();
        self.check_size(data.len())?;

        debug!(url = %url, bytes = data.len(), "Fetched remote artwork");
        Ok(match mime_type {
            Some(mime_type) => ArtworkData::new(data, mime_type),
            None => ArtworkData::from_bytes(data),
        })
    }

    fn check_size(&self, len: usize) -> Result<()> {
        if len > self.max_bytes {
            return Err(ArtworkError::TooLarge(len, self.max_bytes));
        }
        Ok(())
    }
}
