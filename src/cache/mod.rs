//! Response caching with pluggable backends.
//!
//! Every showcase fetch goes through a cache-aside layer: the derived
//! [`CacheKey`] is looked up in the active [`CacheBackend`], and only on a
//! miss does the client hit the network. Three backends ship with the crate:
//!
//! | Backend | Storage | Shared across |
//! |---------|---------|---------------|
//! | [`MemoryBackend`] | in-process LRU map | tasks in one process |
//! | [`SqliteBackend`] | single on-disk file | process restarts |
//! | [`RedisBackend`] | Redis server (`redis` feature) | processes and machines |
//!
//! All three enforce the same contract: entries expire `ttl` after
//! insertion, expired entries read as absent, and a broken backend degrades
//! to a cache miss rather than failing the fetch. Implement [`CacheBackend`]
//! to supply your own store.
//!
//! ## Example
//!
//! ```rust,no_run
//! use enka_client::cache::{CacheConfig, MemoryBackend, ResponseCache};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let config = CacheConfig::new().with_ttl(Duration::from_secs(60));
//! let cache = ResponseCache::new(config, Arc::new(MemoryBackend::new()));
//! ```

mod backend;
mod key;
mod manager;
mod memory;
#[cfg(feature = "redis")]
mod redis;
mod sqlite;

pub use backend::{CacheBackend, CacheError};
pub use key::{CacheKey, CacheKeyBuilder, KeyError};
pub use manager::{CacheConfig, CacheStats, ResponseCache, DEFAULT_TTL};
pub use memory::{MemoryBackend, DEFAULT_CAPACITY};
#[cfg(feature = "redis")]
pub use redis::RedisBackend;
pub use sqlite::SqliteBackend;
