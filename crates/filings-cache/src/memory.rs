//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use filings_core::{CacheEntry, CacheKey, ResponseCache, Result};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Simple in-memory cache for testing and short-lived sessions.
///
/// Data is stored in a `HashMap` behind a `RwLock` and lost when the cache is
/// dropped.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResponseCache for InMemoryCache {
    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let encoded = key.as_string();

        {
            let entries = self.entries.read().await;
            match entries.get(&encoded) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(Utc::now()) => {
                    debug!("Cache hit");
                    return Ok(Some(entry.clone()));
                }
                Some(_) => {}
            }
        }

        self.entries.write().await.remove(&encoded);
        debug!("Cache entry expired");
        Ok(None)
    }

    #[instrument(skip(self, payload), fields(key = %key, bytes = payload.len()))]
    async fn put(&self, key: &CacheKey, payload: &[u8], ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(key.as_string(), payload.to_vec(), ttl);
        self.entries.write().await.insert(entry.key.clone(), entry);
        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn invalidate(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.entries.write().await.remove(&key.as_string()).is_some())
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();

        if removed > 0 {
            debug!("Purged {} expired cache entries", removed);
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        debug!("Cleared in-memory cache");
        Ok(())
    }
}
