//! Error types for filing operations.
//!
//! This module defines [`FilingsError`] which covers all error cases that can
//! occur when resolving companies, fetching, normalizing, caching or exporting
//! filing data.

use std::time::Duration;

use thiserror::Error;

use crate::types::Company;

/// Errors that can occur during filing operations.
#[derive(Error, Debug)]
pub enum FilingsError {
    /// No company matches the query.
    #[error("No company found matching '{0}'")]
    NotFound(String),

    /// Several companies match the query equally well.
    #[error("'{query}' matches {} companies equally well", candidates.len())]
    AmbiguousMatch {
        /// The query that was resolved.
        query: String,
        /// The equally scored candidates, best first.
        candidates: Vec<Company>,
    },

    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream service signalled rate limiting (HTTP 429 or 403).
    #[error("Rate limited by SEC EDGAR: retry after {retry_after:?}")]
    RateLimited {
        /// Suggested time to wait before retrying, from `Retry-After`.
        retry_after: Option<Duration>,
    },

    /// A non-retryable HTTP status.
    #[error("HTTP {status} for {url}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The response did not have the expected JSON shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An output format string was not recognized.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error rendering or writing an export.
    #[error("Export error: {0}")]
    Export(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilingsError {
    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. })
    }
}

/// Result type alias using [`FilingsError`].
pub type Result<T> = std::result::Result<T, FilingsError>;
