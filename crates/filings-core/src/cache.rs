//! Cache trait for storing raw API responses.
//!
//! This module defines the [`ResponseCache`] trait that provides a unified
//! interface for caching response bodies, and [`CacheKey`] which derives a
//! deterministic string key from every parameter that affects a response.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

use crate::{error::Result, types::Cik};

/// A cached response body with its freshness window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    /// Encoded cache key.
    pub key: String,
    /// Raw response body.
    pub payload: Vec<u8>,
    /// When the entry was written.
    pub stored_at: DateTime<Utc>,
    /// How long the entry stays fresh.
    pub ttl: Duration,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(key: impl Into<String>, payload: Vec<u8>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            payload,
            stored_at: Utc::now(),
            ttl,
        }
    }

    /// Returns true once more than `ttl` has passed since `stored_at`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        // A TTL too large for chrono never expires.
        chrono::Duration::from_std(self.ttl)
            .map(|ttl| now - self.stored_at > ttl)
            .unwrap_or(false)
    }
}

/// Identifies one logical EDGAR request.
///
/// The string encoding is stable and is what the on-disk cache stores:
///
/// | key                                   | encoding                                      |
/// |---------------------------------------|-----------------------------------------------|
/// | `CompanyTickers`                      | `company-tickers`                             |
/// | `Submissions { cik }`                 | `submissions/CIK0000320193`                   |
/// | `CompanyFacts { cik }`                | `companyfacts/CIK0000320193`                  |
/// | `CompanyConcept { cik, taxonomy, tag }` | `companyconcept/CIK0000320193/us-gaap/Assets` |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The SEC ticker-to-CIK table.
    CompanyTickers,
    /// A company's submissions (filing history) document.
    Submissions {
        /// Company CIK.
        cik: Cik,
    },
    /// All XBRL facts for a company.
    CompanyFacts {
        /// Company CIK.
        cik: Cik,
    },
    /// A single XBRL concept for a company.
    CompanyConcept {
        /// Company CIK.
        cik: Cik,
        /// Taxonomy namespace.
        taxonomy: String,
        /// Concept tag.
        tag: String,
    },
}

impl CacheKey {
    /// Returns the stable string encoding of this key.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::CompanyTickers => "company-tickers".to_string(),
            Self::Submissions { cik } => format!("submissions/CIK{cik}"),
            Self::CompanyFacts { cik } => format!("companyfacts/CIK{cik}"),
            Self::CompanyConcept { cik, taxonomy, tag } => {
                format!("companyconcept/CIK{cik}/{taxonomy}/{tag}")
            }
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Trait for caching raw API responses.
///
/// Implementations can store data in various backends (SQLite, in-memory, etc.)
/// to avoid repeated API calls. A miss never triggers a fetch; callers decide
/// what to do with it.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Retrieves a fresh entry.
    ///
    /// Returns `Ok(None)` if the key is absent or expired. Expired entries are
    /// removed as a side effect.
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;

    /// Stores a payload under `key`, replacing any previous entry.
    async fn put(&self, key: &CacheKey, payload: &[u8], ttl: Duration) -> Result<()>;

    /// Removes one entry. Returns true if an entry was removed.
    async fn invalidate(&self, key: &CacheKey) -> Result<bool>;

    /// Removes every expired entry.
    ///
    /// Returns the number of entries removed.
    async fn purge_expired(&self) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
