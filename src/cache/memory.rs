//! In-process LRU backend.

use super::backend::{CacheBackend, CacheError};
use super::key::CacheKey;
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default entry capacity for [`MemoryBackend`].
pub const DEFAULT_CAPACITY: usize = 100;

struct Entry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Bounded in-process store with LRU eviction and per-entry TTL.
///
/// `get` on a live entry refreshes its recency; inserting a new key at
/// capacity evicts the least-recently-used entry. The map sits behind a
/// `Mutex` with short critical sections and no awaits while locked, so all
/// operations are atomic with respect to each other.
pub struct MemoryBackend {
    entries: Mutex<LruCache<String, Entry>>,
}

impl MemoryBackend {
    /// Creates a backend with the default capacity of 100 entries.
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap())
    }

    /// Creates a backend bounded to `capacity` entries.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get(key.as_str()) {
            if !entry.is_expired() {
                return Ok(Some(entry.data.clone()));
            }
            entries.pop(key.as_str());
        }
        Ok(None)
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            data: value.to_vec(),
            expires_at: Instant::now() + ttl,
        };
        // LruCache::put evicts the least-recently-used entry when a new key
        // arrives at capacity.
        self.entries
            .lock()
            .unwrap()
            .put(key.as_str().to_owned(), entry);
        Ok(())
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.entries.lock().unwrap().pop(key.as_str());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    async fn close(&self) -> Result<(), CacheError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
