//! Cached, rate-limited access to the EDGAR JSON endpoints.

use filings_core::{
    CacheKey, Cik, Company, ConceptFact, FilingMetadata, FilingsError, ResponseCache, Result,
};
use std::fmt;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::{
    config::EdgarConfig,
    normalize,
    rate_limit::RateLimiter,
    responses::{Submissions, parse_company_tickers},
    transport::{HttpResponse, ReqwestTransport, Transport},
};

/// HTTP client wrapper for SEC EDGAR.
///
/// Every request goes through the same sequence: cache lookup, rate limiter,
/// transport, retry on transient failures, cache write. Cache failures never
/// fail a request; they are logged and treated as misses.
#[derive(Clone)]
pub struct EdgarClient {
    config: EdgarConfig,
    transport: Arc<dyn Transport>,
    cache: Arc<dyn ResponseCache>,
    limiter: Arc<RateLimiter>,
}

impl fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgarClient")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

impl EdgarClient {
    /// Create a client using `reqwest` for transport.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: EdgarConfig, cache: Arc<dyn ResponseCache>) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.user_agent, config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport), cache))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(
        config: EdgarConfig,
        transport: Arc<dyn Transport>,
        cache: Arc<dyn ResponseCache>,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.requests_per_second));
        Self {
            config,
            transport,
            cache,
            limiter,
        }
    }

    /// Handle to the rate limiter every request passes through.
    pub fn rate_limiter(&self) -> Arc<RateLimiter> {
        Arc::clone(&self.limiter)
    }

    /// Fetch the SEC ticker table and group it into companies.
    pub async fn company_tickers(&self) -> Result<Vec<Company>> {
        let url = self.config.tickers_url.clone();
        let companies = self
            .fetch(&CacheKey::CompanyTickers, &url, parse_company_tickers)
            .await?;
        debug!("Loaded {} companies from ticker table", companies.len());
        Ok(companies)
    }

    /// Fetch a company's submissions document.
    pub async fn submissions(&self, cik: Cik) -> Result<Submissions> {
        let url = format!("{}/submissions/CIK{}.json", self.config.base_url, cik);
        self.fetch(&CacheKey::Submissions { cik }, &url, Submissions::from_slice)
            .await
    }

    /// Fetch and normalize every XBRL fact a company has reported.
    pub async fn company_facts(&self, cik: Cik) -> Result<Vec<ConceptFact>> {
        let url = format!(
            "{}/api/xbrl/companyfacts/CIK{}.json",
            self.config.base_url, cik
        );
        self.fetch(&CacheKey::CompanyFacts { cik }, &url, normalize::parse_company_facts)
            .await
    }

    /// Fetch and normalize a single XBRL concept.
    ///
    /// # Errors
    /// Returns [`FilingsError::ResourceNotFound`] when the company never
    /// reported the concept.
    pub async fn company_concept(
        &self,
        cik: Cik,
        taxonomy: &str,
        tag: &str,
    ) -> Result<Vec<ConceptFact>> {
        let url = format!(
            "{}/api/xbrl/companyconcept/CIK{}/{}/{}.json",
            self.config.base_url, cik, taxonomy, tag
        );
        let key = CacheKey::CompanyConcept {
            cik,
            taxonomy: taxonomy.to_string(),
            tag: tag.to_string(),
        };
        self.fetch(&key, &url, normalize::parse_company_concept)
            .await
    }

    /// Recent filings from the submissions document, newest first.
    ///
    /// # Arguments
    /// * `cik` - Company CIK
    /// * `form` - Only this form type (e.g., "10-K"); `None` for every form
    /// * `limit` - Maximum number of filings
    pub async fn filings(
        &self,
        cik: Cik,
        form: Option<&str>,
        limit: usize,
    ) -> Result<Vec<FilingMetadata>> {
        let submissions = self.submissions(cik).await?;
        Ok(submissions.recent_filings(form, limit))
    }

    /// Parse the body for `key`, from the cache when fresh, else from `url`.
    ///
    /// Only bodies that `parse` accepts are written to the cache. A cached
    /// body that no longer parses is dropped and fetched again.
    #[instrument(skip(self, url, parse), fields(key = %key))]
    async fn fetch<T>(
        &self,
        key: &CacheKey,
        url: &str,
        parse: impl Fn(&[u8]) -> Result<T>,
    ) -> Result<T> {
        match self.cache.get(key).await {
            Ok(Some(entry)) => match parse(&entry.payload) {
                Ok(parsed) => {
                    debug!("Serving from cache");
                    return Ok(parsed);
                }
                Err(e) => {
                    warn!(error = %e, "Dropping unreadable cache entry");
                    if let Err(e) = self.cache.invalidate(key).await {
                        warn!(error = %e, "Cache invalidate failed");
                    }
                }
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache read failed, treating as miss"),
        }

        let body = self.fetch_with_retry(url).await?;
        let parsed = parse(&body)?;

        if let Err(e) = self.cache.put(key, &body, self.config.cache_ttl).await {
            warn!(error = %e, "Cache write failed");
        }
        Ok(parsed)
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<Vec<u8>> {
        let mut attempt = 0_u32;
        loop {
            self.limiter.acquire().await;

            let error = match self.transport.get(url).await {
                Ok(response) => match classify(url, response) {
                    Ok(body) => return Ok(body),
                    Err(e) => e,
                },
                Err(e) => e,
            };

            if !error.is_retryable() || attempt >= self.config.max_retries {
                return Err(error);
            }

            let delay = match &error {
                FilingsError::RateLimited {
                    retry_after: Some(retry_after),
                } => *retry_after,
                _ => self.config.backoff(attempt),
            };
            attempt += 1;
            warn!(
                attempt,
                max_retries = self.config.max_retries,
                ?delay,
                error = %error,
                "Request to {} failed, retrying",
                url
            );
            sleep(delay).await;
        }
    }
}

/// Map an HTTP response to its body or a typed error.
fn classify(url: &str, response: HttpResponse) -> Result<Vec<u8>> {
    match response.status {
        200..=299 => Ok(response.body),
        404 => Err(FilingsError::ResourceNotFound(url.to_string())),
        403 | 429 => Err(FilingsError::RateLimited {
            retry_after: response.retry_after,
        }),
        status @ 500..=599 => Err(FilingsError::Network(format!("HTTP {status} from {url}"))),
        status => Err(FilingsError::HttpStatus {
            status,
            url: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use filings_cache::{InMemoryCache, NoopCache};
    use std::time::Duration;

    const FACTS: &str = r#"{"cik": 320193, "entityName": "Apple Inc.", "facts": {"us-gaap": {
        "Assets": {"label": "Assets", "units": {"USD": [
            {"end": "2023-09-30", "val": 352583000000, "accn": "0000320193-23-000106",
             "fy": 2023, "fp": "FY", "form": "10-K", "filed": "2023-11-03"}
        ]}}
    }}}"#;

    fn config() -> EdgarConfig {
        EdgarConfig::default()
            .with_base_url("http://edgar.test")
            .with_retry_delay(Duration::from_millis(100))
    }

    fn cik() -> Cik {
        Cik::try_from(320_193_u32).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_response_skips_transport() {
        let transport = Arc::new(ScriptedTransport::new());
        let cache = Arc::new(InMemoryCache::new());
        cache
            .put(
                &CacheKey::CompanyFacts { cik: cik() },
                FACTS.as_bytes(),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let client = EdgarClient::with_transport(config(), transport.clone(), cache);
        let facts = client.company_facts(cik()).await.unwrap();

        assert_eq!(facts.len(), 1);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_miss_fetches_and_populates_cache() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, FACTS));
        let cache = Arc::new(InMemoryCache::new());
        let client = EdgarClient::with_transport(config(), transport.clone(), cache.clone());

        client.company_facts(cik()).await.unwrap();
        client.company_facts(cik()).await.unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(
            transport.requested_urls(),
            vec!["http://edgar.test/api/xbrl/companyfacts/CIK0000320193.json"]
        );
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_body_is_not_cached() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, "<html>maintenance</html>")
                .respond(200, FACTS),
        );
        let cache = Arc::new(InMemoryCache::new());
        let client = EdgarClient::with_transport(config(), transport.clone(), cache.clone());

        let err = client.company_facts(cik()).await.unwrap_err();
        assert!(matches!(err, FilingsError::MalformedResponse(_)));
        assert_eq!(cache.len().await, 0);

        let facts = client.company_facts(cik()).await.unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(transport.calls(), 2);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreadable_cache_entry_is_refetched() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, FACTS));
        let cache = Arc::new(InMemoryCache::new());
        let key = CacheKey::CompanyFacts { cik: cik() };
        cache
            .put(&key, b"<html>maintenance</html>", Duration::from_secs(60))
            .await
            .unwrap();

        let client = EdgarClient::with_transport(config(), transport.clone(), cache.clone());
        let facts = client.company_facts(cik()).await.unwrap();

        assert_eq!(facts.len(), 1);
        assert_eq!(transport.calls(), 1);
        assert_eq!(cache.get(&key).await.unwrap().unwrap().payload, FACTS.as_bytes());
    }

    #[tokio::test(start_paused = true)]
    async fn test_503_then_200_succeeds_after_one_retry() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(503, "unavailable")
                .respond(200, FACTS),
        );
        let client =
            EdgarClient::with_transport(config(), transport.clone(), Arc::new(NoopCache::new()));

        let start = tokio::time::Instant::now();
        let facts = client.company_facts(cik()).await.unwrap();

        assert_eq!(facts.len(), 1);
        assert_eq!(transport.calls(), 2);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_404_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new().respond(404, "not found"));
        let client =
            EdgarClient::with_transport(config(), transport.clone(), Arc::new(NoopCache::new()));

        let err = client
            .company_concept(cik(), "us-gaap", "NoSuchTag")
            .await
            .unwrap_err();

        assert!(matches!(err, FilingsError::ResourceNotFound(_)));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_exhausted_surface_last_error() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .fail_network()
                .fail_network()
                .fail_network()
                .fail_network(),
        );
        let client =
            EdgarClient::with_transport(config(), transport.clone(), Arc::new(NoopCache::new()));

        let start = tokio::time::Instant::now();
        let err = client.submissions(cik()).await.unwrap_err();

        assert!(matches!(err, FilingsError::Network(_)));
        assert_eq!(transport.calls(), 4);
        // 100ms + 200ms + 400ms of backoff
        assert!(start.elapsed() >= Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_honors_retry_after() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .push(HttpResponse::new(429, "slow down").with_retry_after(Duration::from_secs(5)))
                .respond(200, r#"{"name": "Apple Inc."}"#),
        );
        let client =
            EdgarClient::with_transport(config(), transport.clone(), Arc::new(NoopCache::new()));

        let start = tokio::time::Instant::now();
        let submissions = client.submissions(cik()).await.unwrap();

        assert_eq!(submissions.name, "Apple Inc.");
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_status_is_http_status() {
        let transport = Arc::new(ScriptedTransport::new().respond(400, "bad request"));
        let client =
            EdgarClient::with_transport(config(), transport.clone(), Arc::new(NoopCache::new()));

        let err = client.submissions(cik()).await.unwrap_err();
        assert!(matches!(err, FilingsError::HttpStatus { status: 400, .. }));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_classify() {
        assert!(classify("u", HttpResponse::new(200, "ok")).is_ok());
        assert!(matches!(
            classify("u", HttpResponse::new(403, "")),
            Err(FilingsError::RateLimited { retry_after: None })
        ));
        assert!(matches!(
            classify("u", HttpResponse::new(502, "")),
            Err(FilingsError::Network(_))
        ));
    }
}
