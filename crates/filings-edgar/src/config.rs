//! Client configuration.

use filings_core::{FilingsError, Result};
use std::time::Duration;

/// SEC EDGAR data API base URL.
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL.
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// User agent sent when none is configured.
///
/// The SEC asks every client to identify itself with a contact address.
pub const DEFAULT_USER_AGENT: &str = "filings/0.1 (contact@example.com)";

/// Default rate limit: 10 requests per second (SEC fair access policy).
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// Tunables for [`EdgarClient`](crate::EdgarClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgarConfig {
    /// Identifying `User-Agent` header, e.g. "AppName/Version (contact@email.com)".
    pub user_agent: String,
    /// Base URL of the data API (submissions and XBRL endpoints).
    pub base_url: String,
    /// URL of the ticker-to-CIK table.
    pub tickers_url: String,
    /// Ceiling on requests issued in any one-second window.
    pub requests_per_second: u32,
    /// Retries after the first attempt for retryable failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further retry.
    pub retry_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long cached responses stay fresh.
    pub cache_ttl: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: EDGAR_BASE_URL.to_string(),
            tickers_url: COMPANY_TICKERS_URL.to_string(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl EdgarConfig {
    /// Create a configuration with defaults and the given user agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    /// Set the data API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the ticker table URL.
    #[must_use]
    pub fn with_tickers_url(mut self, tickers_url: impl Into<String>) -> Self {
        self.tickers_url = tickers_url.into();
        self
    }

    /// Set the request ceiling per second.
    #[must_use]
    pub const fn with_requests_per_second(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    /// Set the number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial retry delay.
    #[must_use]
    pub const fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the cache TTL.
    #[must_use]
    pub const fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Delay before retry number `attempt` (zero-based).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(1_u32 << attempt.min(16))
    }

    /// Checks that the configuration can be used.
    ///
    /// # Errors
    /// Returns [`FilingsError::InvalidParameter`] for an empty user agent or a
    /// zero rate limit.
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(FilingsError::InvalidParameter(
                "User agent must not be empty".to_string(),
            ));
        }
        if self.requests_per_second == 0 {
            return Err(FilingsError::InvalidParameter(
                "Rate limit must be at least 1 request per second".to_string(),
            ));
        }
        Ok(())
    }
}
