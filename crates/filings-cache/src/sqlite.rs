//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use filings_core::{CacheEntry, CacheKey, FilingsError, ResponseCache, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, instrument};

/// SQLite-based cache for raw API responses.
///
/// This cache stores response bodies in a SQLite database file, providing
/// persistence across runs. Rows live in a single `response_cache` table keyed
/// by the encoded [`CacheKey`].
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

fn cache_err(e: impl std::fmt::Display) -> FilingsError {
    FilingsError::Cache(e.to_string())
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(cache_err)?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(cache_err)?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(cache_err)
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS response_cache (
                key TEXT PRIMARY KEY,
                payload BLOB NOT NULL,
                stored_at TEXT NOT NULL,
                ttl_ms INTEGER NOT NULL
            )",
            [],
        )
        .map_err(cache_err)?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }

    fn row_to_entry(
        key: String,
        payload: Vec<u8>,
        stored_at: &str,
        ttl_ms: i64,
    ) -> Result<CacheEntry> {
        let stored_at = DateTime::parse_from_rfc3339(stored_at)
            .map_err(|e| FilingsError::Cache(format!("Invalid stored_at for {key}: {e}")))?
            .with_timezone(&Utc);
        let ttl = Duration::from_millis(u64::try_from(ttl_ms).unwrap_or(0));
        Ok(CacheEntry {
            key,
            payload,
            stored_at,
            ttl,
        })
    }

    /// Number of rows currently stored, fresh or not.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn len(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM response_cache", [], |row| row.get(0))
            .map_err(cache_err)?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Returns true if no rows are stored.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ResponseCache for SqliteCache {
    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let encoded = key.as_string();
        let conn = self.lock()?;

        let row = conn
            .query_row(
                "SELECT payload, stored_at, ttl_ms FROM response_cache WHERE key = ?1",
                params![encoded],
                |row| {
                    Ok((
                        row.get::<_, Vec<u8>>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()
            .map_err(cache_err)?;

        let Some((payload, stored_at, ttl_ms)) = row else {
            debug!("Cache miss");
            return Ok(None);
        };

        let entry = Self::row_to_entry(encoded, payload, &stored_at, ttl_ms)?;
        if entry.is_expired(Utc::now()) {
            conn.execute(
                "DELETE FROM response_cache WHERE key = ?1",
                params![entry.key],
            )
            .map_err(cache_err)?;
            debug!("Cache entry expired");
            return Ok(None);
        }

        debug!(bytes = entry.payload.len(), "Cache hit");
        Ok(Some(entry))
    }

    #[instrument(skip(self, payload), fields(key = %key, bytes = payload.len()))]
    async fn put(&self, key: &CacheKey, payload: &[u8], ttl: Duration) -> Result<()> {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let conn = self.lock()?;

        conn.execute(
            "INSERT OR REPLACE INTO response_cache (key, payload, stored_at, ttl_ms)
             VALUES (?1, ?2, ?3, ?4)",
            params![key.as_string(), payload, Utc::now().to_rfc3339(), ttl_ms],
        )
        .map_err(cache_err)?;

        debug!("Cached response");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn invalidate(&self, key: &CacheKey) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn
            .execute(
                "DELETE FROM response_cache WHERE key = ?1",
                params![key.as_string()],
            )
            .map_err(cache_err)?;
        Ok(deleted > 0)
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare("SELECT key, stored_at, ttl_ms FROM response_cache")
            .map_err(cache_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(cache_err)?;

        let mut expired = Vec::new();
        for row in rows {
            let (key, stored_at, ttl_ms) = row.map_err(cache_err)?;
            let entry = Self::row_to_entry(key, Vec::new(), &stored_at, ttl_ms)?;
            if entry.is_expired(now) {
                expired.push(entry.key);
            }
        }
        drop(stmt);

        let mut total_deleted = 0usize;
        for key in &expired {
            total_deleted += conn
                .execute("DELETE FROM response_cache WHERE key = ?1", params![key])
                .map_err(cache_err)?;
        }

        if total_deleted > 0 {
            debug!("Purged {} expired cache entries", total_deleted);
        }
        Ok(total_deleted)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM response_cache", [])
            .map_err(cache_err)?;

        debug!("Cleared all cache entries");
        Ok(())
    }
}
