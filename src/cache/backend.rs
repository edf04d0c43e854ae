//! The capability contract every cache backend satisfies.

use super::key::CacheKey;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// A cache-internal failure.
///
/// These never propagate out of the fetch path: [`super::ResponseCache`]
/// absorbs them and falls through to the upstream call. They are only
/// surfaced directly when the caller drives backend lifecycle operations
/// (`clear`, `close`) by hand.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The storage medium is unreachable or the backend was closed.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    /// The storage operation itself failed.
    #[error("cache storage error: {0}")]
    Storage(String),

    /// A remote operation exceeded its deadline.
    #[error("cache operation timed out")]
    Timeout,
}

/// Storage backend contract for the response cache.
///
/// Implement this trait to plug in a custom store. All operations must be
/// safe under concurrent calls from multiple tasks sharing one instance.
///
/// A logically expired entry must be reported as absent by [`get`], even if
/// the backend has not physically purged it yet (lazy expiry is fine).
///
/// [`get`]: CacheBackend::get
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Looks up a raw payload. A plain miss is `Ok(None)`, never an error.
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores a payload with absolute expiry `now + ttl`, overwriting any
    /// existing entry for the key. Must apply fully or not at all.
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    /// Removes an entry if present; no-op when absent.
    async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError>;

    /// Removes all entries owned by this backend.
    async fn clear(&self) -> Result<(), CacheError>;

    /// Releases the underlying resource (file handle, connection, map).
    /// Idempotent: a second call is a no-op.
    async fn close(&self) -> Result<(), CacheError>;

    /// Backend label used in logs and stats.
    fn name(&self) -> &'static str;
}
