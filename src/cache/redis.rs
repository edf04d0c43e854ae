//! Distributed backend on top of Redis.

use super::backend::{CacheBackend, CacheError};
use super::key::CacheKey;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Default deadline for a single remote operation.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

const KEY_PREFIX: &str = "enka-client:";

/// Networked backend sharing the cache across processes and machines.
///
/// Expiry is delegated to Redis's native TTL (`SET .. EX`). Concurrency
/// guarantees are the store's own; this wrapper adds only a per-operation
/// deadline. Transient network failures surface as [`CacheError`], which the
/// orchestrator degrades to a miss/no-op — a flaky Redis never turns into a
/// fetch failure.
pub struct RedisBackend {
    conn: ConnectionManager,
    op_timeout: Duration,
    closed: AtomicBool,
}

impl RedisBackend {
    /// Connects to `url` (e.g. `redis://localhost:6379`).
    ///
    /// The connection manager transparently reconnects after transient
    /// drops, so a single backend instance stays usable for the client's
    /// whole lifetime.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        Self::connect_with_timeout(url, DEFAULT_OP_TIMEOUT).await
    }

    /// Connects with a custom per-operation deadline.
    pub async fn connect_with_timeout(
        url: &str,
        op_timeout: Duration,
    ) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        let conn = tokio::time::timeout(op_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(Self {
            conn,
            op_timeout,
            closed: AtomicBool::new(false),
        })
    }

    fn prefixed(&self, key: &CacheKey) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    // Applies the close guard and the operation deadline uniformly.
    async fn run<T, F>(&self, op: F) -> Result<T, CacheError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::Unavailable("redis cache is closed".into()));
        }
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(|e| CacheError::Storage(e.to_string()))
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError> {
        let redis_key = self.prefixed(key);
        let mut conn = self.conn.clone();
        self.run(async move { conn.get::<_, Option<Vec<u8>>>(redis_key).await })
            .await
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let redis_key = self.prefixed(key);
        let value = value.to_vec();
        // Redis TTLs are whole seconds; round sub-second TTLs up so an entry
        // is never stored without expiry.
        let ttl_secs = ttl.as_secs().max(1);
        let mut conn = self.conn.clone();
        self.run(async move { conn.set_ex::<_, _, ()>(redis_key, value, ttl_secs).await })
            .await
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError> {
        let redis_key = self.prefixed(key);
        let mut conn = self.conn.clone();
        self.run(async move { conn.del::<_, ()>(redis_key).await })
            .await
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        self.run(async move {
            // Only this client's keyspace; never FLUSHDB on a shared store.
            let pattern = format!("{KEY_PREFIX}*");
            let keys: Vec<String> = {
                let mut iter = conn.scan_match::<_, String>(pattern).await?;
                let mut keys = Vec::new();
                while let Some(k) = iter.next_item().await {
                    keys.push(k);
                }
                keys
            };
            if !keys.is_empty() {
                conn.del::<_, ()>(keys).await?;
            }
            Ok(())
        })
        .await
    }

    async fn close(&self) -> Result<(), CacheError> {
        // The manager's sockets are released when the backend drops; the
        // flag just makes later operations fail fast and keeps close
        // idempotent.
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
