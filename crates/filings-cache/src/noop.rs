//! No-op cache implementation.

use async_trait::async_trait;
use filings_core::{CacheEntry, CacheKey, ResponseCache, Result};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always misses and `put` discards the payload. Used when caching is
/// disabled or the cache directory is unusable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResponseCache for NoopCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        trace!(%key, "NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, key: &CacheKey, _payload: &[u8], _ttl: Duration) -> Result<()> {
        trace!(%key, "NoopCache: put called, doing nothing");
        Ok(())
    }

    async fn invalidate(&self, _key: &CacheKey) -> Result<bool> {
        Ok(false)
    }

    async fn purge_expired(&self) -> Result<usize> {
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_cache_always_misses() {
        let cache = NoopCache::new();
        let key = CacheKey::CompanyTickers;

        cache.put(&key, b"table", Duration::from_secs(60)).await.unwrap();

        assert!(cache.get(&key).await.unwrap().is_none());
        assert!(!cache.invalidate(&key).await.unwrap());
        assert_eq!(cache.purge_expired().await.unwrap(), 0);
    }
}
