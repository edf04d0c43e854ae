//! Single-file persistent backend.

use super::backend::{CacheBackend, CacheError};
use super::key::CacheKey;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

/// Embedded store backed by a single SQLite file; entries survive process
/// restarts.
///
/// The connection lives behind a `Mutex<Option<..>>` and every statement
/// runs on the blocking thread pool, so the async executor never stalls on
/// disk I/O. Each `set` is a single upsert statement: SQLite applies it
/// atomically, so a crash mid-write never exposes a torn entry.
///
/// Capacity is disk-limited; expiry is lazy (filtered on read, dead rows
/// purged on write).
pub struct SqliteBackend {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteBackend {
    /// Default on-disk location, mirroring the asset directory layout.
    pub fn default_path() -> PathBuf {
        PathBuf::from(".enka/cache.db")
    }

    /// Opens (creating if needed) the cache database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_owned();
        let conn = task::spawn_blocking(move || -> Result<Connection, CacheError> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| CacheError::Unavailable(e.to_string()))?;
                }
            }
            let conn = Connection::open(&path).map_err(storage_err)?;
            conn.execute(
                "CREATE TABLE IF NOT EXISTS cache (
                     key        TEXT PRIMARY KEY,
                     value      BLOB NOT NULL,
                     expires_at INTEGER NOT NULL
                 )",
                [],
            )
            .map_err(storage_err)?;
            Ok(conn)
        })
        .await
        .map_err(join_err)??;

        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
        })
    }

    // Runs `f` against the live connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, CacheError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, CacheError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            let guard = conn.lock().unwrap();
            let conn = guard
                .as_ref()
                .ok_or_else(|| CacheError::Unavailable("sqlite cache is closed".into()))?;
            f(conn)
        })
        .await
        .map_err(join_err)?
    }
}

fn storage_err(e: rusqlite::Error) -> CacheError {
    CacheError::Storage(e.to_string())
}

fn join_err(e: task::JoinError) -> CacheError {
    CacheError::Unavailable(e.to_string())
}

fn unix_now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[async_trait]
impl CacheBackend for SqliteBackend {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheError> {
        let key = key.as_str().to_owned();
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare_cached("SELECT value FROM cache WHERE key = ?1 AND expires_at > ?2")
                .map_err(storage_err)?;
            let mut rows = stmt
                .query(params![key, unix_now_millis()])
                .map_err(storage_err)?;
            match rows.next().map_err(storage_err)? {
                Some(row) => Ok(Some(row.get(0).map_err(storage_err)?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let key = key.as_str().to_owned();
        let value = value.to_vec();
        self.with_conn(move |conn| {
            let now = unix_now_millis();
            // Amortized purge of dead rows; reads only filter.
            conn.execute("DELETE FROM cache WHERE expires_at <= ?1", params![now])
                .map_err(storage_err)?;
            conn.execute(
                "INSERT INTO cache (key, value, expires_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                expires_at = excluded.expires_at",
                params![key, value, now + ttl.as_millis() as i64],
            )
            .map_err(storage_err)?;
            Ok(())
        })
        .await
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError> {
        let key = key.as_str().to_owned();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM cache WHERE key = ?1", params![key])
                .map_err(storage_err)?;
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM cache", []).map_err(storage_err)?;
            Ok(())
        })
        .await
    }

    async fn close(&self) -> Result<(), CacheError> {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            // Dropping the connection closes the file handle; a second call
            // finds None and does nothing.
            conn.lock().unwrap().take();
        })
        .await
        .map_err(join_err)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
