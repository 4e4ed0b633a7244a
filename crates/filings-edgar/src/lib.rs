#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR access for financial statements.
//!
//! This crate provides access to SEC EDGAR XBRL data including:
//!
//! - Company resolution from tickers and free-text names
//! - Cached, rate-limited requests with retry and backoff
//! - Normalization of `companyfacts` / `companyconcept` documents
//! - Statement assembly from a static concept table
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use filings_core::{PeriodType, StatementRequest, StatementType};
//! use filings_cache::NoopCache;
//! use filings_edgar::{EdgarConfig, EdgarProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EdgarConfig::new("MyApp/1.0 (contact@example.com)");
//!     let provider = EdgarProvider::new(config, Arc::new(NoopCache::new()))?;
//!
//!     let company = provider.resolver().await?.resolve_unique("AAPL")?;
//!     let request = StatementRequest::new(StatementType::BalanceSheet, PeriodType::Annual);
//!     for record in provider.statements(company.cik, &request).await? {
//!         println!("{} {}: {} line items", record.kind, record.period_end, record.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Cached, rate-limited HTTP client for the EDGAR endpoints.
pub mod client;
/// Static table of statement concepts.
pub mod concepts;
/// Client configuration.
pub mod config;
/// XBRL fact normalization.
pub mod normalize;
/// High-level provider.
pub mod provider;
/// Sliding-window rate limiter.
pub mod rate_limit;
/// Company name and ticker resolution.
pub mod resolver;
/// SEC API response types.
pub mod responses;
/// Statement assembly.
pub mod statements;
/// HTTP transport seam.
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::EdgarClient;
pub use concepts::{ConceptDefinition, Section};
pub use config::EdgarConfig;
pub use provider::EdgarProvider;
pub use rate_limit::RateLimiter;
pub use resolver::{Candidate, CompanyResolver, Resolution};
pub use responses::Submissions;
pub use statements::build_statements;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
