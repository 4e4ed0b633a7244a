#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for SEC EDGAR financial statement retrieval.
//!
//! This crate provides the foundational abstractions shared by the rest of the
//! workspace:
//!
//! - [`Cik`](types::Cik), [`Company`](types::Company) and
//!   [`ConceptFact`](types::ConceptFact) - the normalized domain model
//! - [`StatementType`](statement::StatementType),
//!   [`PeriodType`](period::PeriodType) and
//!   [`OutputFormat`](format::OutputFormat) - closed request selectors
//! - [`ResponseCache`](cache::ResponseCache) - caching abstraction keyed by
//!   [`CacheKey`](cache::CacheKey)

/// Response cache trait, entries and key derivation.
pub mod cache;
/// Error types for filing operations.
pub mod error;
/// Output format selector.
pub mod format;
/// Reporting period selector and period matching rules.
pub mod period;
/// Statement kinds and the statement type selector.
pub mod statement;
/// Core data types (Cik, Company, ConceptFact, StatementRecord, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{CacheEntry, CacheKey, ResponseCache};
pub use error::{FilingsError, Result};
pub use format::OutputFormat;
pub use period::PeriodType;
pub use statement::{StatementKind, StatementType};
pub use types::{
    Cik, Company, ConceptFact, FilingMetadata, StatementRecord, StatementRequest,
};
