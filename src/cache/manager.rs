//! Cache-aside orchestration.

use super::backend::{CacheBackend, CacheError};
use super::key::CacheKey;
use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default entry time-to-live, matching the API's own `ttl` hint.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Cache behavior configuration, fixed at client construction.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Point-in-time snapshot of cache effectiveness counters.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sets: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Cache-aside layer between fetch operations and the upstream network call.
///
/// One instance is shared (behind `Arc`) by every concurrent fetch issued
/// through a client; the backend provides its own interior synchronization,
/// so callers need no external locking.
///
/// Backend failures and undecodable entries are absorbed here: the worst
/// outcome of a broken cache is "no cache benefit this call". Upstream
/// failures propagate unchanged and are never stored.
pub struct ResponseCache {
    config: CacheConfig,
    backend: Arc<dyn CacheBackend>,
    stats: AtomicStats,
}

impl ResponseCache {
    pub fn new(config: CacheConfig, backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            config,
            backend,
            stats: AtomicStats::new(),
        }
    }

    /// Looks up `key`; on a miss, runs `upstream` and stores its result.
    ///
    /// Two calls racing on the same missing key may both invoke `upstream`
    /// (at-most-duplicate, no per-key coalescing). The `set` runs after the
    /// upstream future completes and each backend applies it atomically, so
    /// cancelling a fetch never leaves a torn entry behind.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &CacheKey, upstream: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.backend.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(%key, backend = self.backend.name(), "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    // Undecodable entry: drop it and fall through to upstream.
                    self.stats.errors.fetch_add(1, Ordering::Relaxed);
                    warn!(%key, error = %e, "corrupt cache entry, invalidating");
                    if let Err(e) = self.backend.invalidate(key).await {
                        warn!(%key, error = %e, "failed to invalidate corrupt entry");
                    }
                }
            },
            Ok(None) => {}
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(%key, error = %e, "cache read failed, treating as miss");
            }
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        debug!(%key, backend = self.backend.name(), "cache miss");

        let value = upstream().await?;

        match serde_json::to_vec(&value) {
            Ok(bytes) => match self.backend.set(key, &bytes, self.config.ttl).await {
                Ok(()) => {
                    self.stats.sets.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    self.stats.errors.fetch_add(1, Ordering::Relaxed);
                    warn!(%key, error = %e, "cache write failed");
                }
            },
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(%key, error = %e, "failed to encode value for caching");
            }
        }

        Ok(value)
    }

    /// Removes a single entry.
    pub async fn invalidate(&self, key: &CacheKey) -> Result<()> {
        self.backend.invalidate(key).await.map_err(Into::into)
    }

    /// Removes all entries from the active backend.
    pub async fn clear(&self) -> Result<()> {
        self.backend.clear().await.map_err(Into::into)
    }

    /// Releases the backend's resources. Safe to call more than once.
    pub async fn close(&self) -> Result<()> {
        self.backend.close().await.map_err(Into::into)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryBackend;
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    fn key() -> CacheKey {
        CacheKey::builder("test").param("uid", "901211014").build().unwrap()
    }

    fn cache_with_ttl(ttl: Duration) -> ResponseCache {
        ResponseCache::new(
            CacheConfig::new().with_ttl(ttl),
            Arc::new(MemoryBackend::new()),
        )
    }

    #[tokio::test]
    async fn second_fetch_within_ttl_skips_upstream() {
        let cache = cache_with_ttl(Duration::from_secs(100));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value: String = cache
                .get_or_fetch(&key(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("payload".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "payload");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.sets, 1);
    }

    #[tokio::test]
    async fn fetch_after_expiry_calls_upstream_again() {
        let cache = cache_with_ttl(Duration::from_millis(20));
        let calls = AtomicUsize::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(42u32)
        };
        cache.get_or_fetch(&key(), fetch).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        cache.get_or_fetch(&key(), fetch).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn upstream_error_propagates_and_nothing_is_cached() {
        let cache = cache_with_ttl(Duration::from_secs(100));

        let result: Result<String> = cache
            .get_or_fetch(&key(), || async { Err(Error::PlayerDoesNotExist) })
            .await;
        assert!(matches!(result, Err(Error::PlayerDoesNotExist)));

        // The failure left no entry behind; the next call hits upstream.
        let calls = AtomicUsize::new(0);
        cache
            .get_or_fetch(&key(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("ok".to_string())
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn corrupt_entry_is_invalidated_and_refetched() {
        let backend = Arc::new(MemoryBackend::new());
        let cache = ResponseCache::new(CacheConfig::default(), backend.clone());

        // Plant bytes that do not decode as the expected type.
        use crate::cache::CacheBackend as _;
        backend
            .set(&key(), b"not json at all", Duration::from_secs(100))
            .await
            .unwrap();

        let value: u32 = cache
            .get_or_fetch(&key(), || async { Ok(7u32) })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(cache.stats().errors, 1);
    }

    #[tokio::test]
    async fn unavailable_backend_degrades_to_upstream() {
        struct BrokenBackend;

        #[async_trait]
        impl CacheBackend for BrokenBackend {
            async fn get(&self, _: &CacheKey) -> std::result::Result<Option<Vec<u8>>, CacheError> {
                Err(CacheError::Unavailable("down".into()))
            }
            async fn set(
                &self,
                _: &CacheKey,
                _: &[u8],
                _: Duration,
            ) -> std::result::Result<(), CacheError> {
                Err(CacheError::Unavailable("down".into()))
            }
            async fn invalidate(&self, _: &CacheKey) -> std::result::Result<(), CacheError> {
                Ok(())
            }
            async fn clear(&self) -> std::result::Result<(), CacheError> {
                Ok(())
            }
            async fn close(&self) -> std::result::Result<(), CacheError> {
                Ok(())
            }
            fn name(&self) -> &'static str {
                "broken"
            }
        }

        let cache = ResponseCache::new(CacheConfig::default(), Arc::new(BrokenBackend));
        let value: String = cache
            .get_or_fetch(&key(), || async { Ok("fetched anyway".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "fetched anyway");
        assert_eq!(cache.stats().errors, 2);
    }

    #[tokio::test]
    async fn concurrent_misses_may_duplicate_but_stay_consistent() {
        let cache = Arc::new(cache_with_ttl(Duration::from_secs(100)));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            tasks.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(&key(), || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok("v".to_string())
                    })
                    .await
                    .unwrap()
            }));
        }
        for t in tasks {
            assert_eq!(t.await.unwrap(), "v");
        }

        // At-most-duplicate: between 1 and 4 upstream calls, and afterwards
        // the key is warm.
        let n = calls.load(Ordering::SeqCst);
        assert!((1..=4).contains(&n));
        let warm: String = cache
            .get_or_fetch(&key(), || async { unreachable!() })
            .await
            .unwrap();
        assert_eq!(warm, "v");
    }
}
