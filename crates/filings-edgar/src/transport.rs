//! HTTP transport seam.
//!
//! [`EdgarClient`](crate::EdgarClient) talks to the network only through the
//! [`Transport`] trait so that retry, caching and rate limiting can be
//! exercised against scripted responses.

use async_trait::async_trait;
use filings_core::{FilingsError, Result};
use reqwest::header::RETRY_AFTER;
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

/// A response as seen by the client: status, `Retry-After` and body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed `Retry-After` header (delta-seconds form only).
    pub retry_after: Option<Duration>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A response with the given status and body and no `Retry-After`.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    /// Attach a `Retry-After` delay.
    #[must_use]
    pub const fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }
}

/// Issues a single GET request.
///
/// Implementations report connection failures and timeouts as
/// [`FilingsError::Network`] and return every HTTP status as a response.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Fetch `url`.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport that identifies itself with `user_agent`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| FilingsError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FilingsError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_retry_after);

        let body = response
            .bytes()
            .await
            .map_err(|e| FilingsError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            retry_after,
            body: body.to_vec(),
        })
    }
}

/// Parse the delta-seconds form of `Retry-After`.
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
