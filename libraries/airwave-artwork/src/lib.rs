//! Airwave Artwork - artwork loading for now-playing metadata
//!
//! Loads the image shown on the lock screen and in the mini player for the
//! current episode or station. Artwork is addressed by URL: `file://` URLs are
//! read from disk, `http`/`https` URLs are fetched over the network.
//!
//! # Features
//!
//! - LRU caching keyed by URL
//! - Size limits to prevent memory issues
//! - Base64 encoding for web transfer
//!
//! # Example
//!
//! ```no_run
//! use airwave_artwork::ArtworkLoader;
//! use url::Url;
//!
//! # async fn demo() -> airwave_artwork::Result<()> {
//! let loader = ArtworkLoader::new(64); // Cache 64 images
//! let url = Url::parse("https://example.com/cover.jpg").unwrap();
//!
//! let artwork = loader.load(&url).await?;
//! println!("{} bytes, type: {}", artwork.data.len(), artwork.mime_type);
//!
//! // Second lookup is served from the cache
//! assert!(loader.cached(&url).is_some());
//! # Ok(())
//! # }
//! ```

mod error;
mod loader;
mod types;

// Re-export public API
pub use error::{ArtworkError, Result};
pub use loader::ArtworkLoader;
pub use types::ArtworkData;
