//! Core data types for filing data.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Cik`] - SEC Central Index Key
//! - [`Company`] - A filer with its tickers
//! - [`ConceptFact`] - One normalized XBRL fact
//! - [`StatementRecord`] - Ordered line items of one statement for one period
//! - [`FilingMetadata`] - One row of a company's filing history
//! - [`StatementRequest`] - What statements to build

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{FilingsError, Result};
use crate::period::PeriodType;
use crate::statement::{StatementKind, StatementType};

/// A SEC Central Index Key.
///
/// Displays zero-padded to ten digits, the form every EDGAR endpoint expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Cik(u64);

impl Cik {
    /// Largest value that fits in ten digits.
    pub const MAX: u64 = 9_999_999_999;

    /// Creates a CIK, rejecting zero and values wider than ten digits.
    pub fn new(value: u64) -> Result<Self> {
        if value == 0 || value > Self::MAX {
            return Err(FilingsError::InvalidParameter(format!(
                "CIK out of range: {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

impl FromStr for Cik {
    type Err = FilingsError;

    /// Accepts `320193`, `0000320193` and `CIK0000320193`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("CIK")
            .or_else(|| trimmed.strip_prefix("cik"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FilingsError::InvalidParameter(format!("Invalid CIK: '{s}'")));
        }

        let value = digits
            .parse::<u64>()
            .map_err(|e| FilingsError::InvalidParameter(format!("Invalid CIK '{s}': {e}")))?;
        Self::new(value)
    }
}

impl TryFrom<u64> for Cik {
    type Error = FilingsError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<u32> for Cik {
    type Error = FilingsError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(u64::from(value))
    }
}

impl From<Cik> for u64 {
    fn from(cik: Cik) -> Self {
        cik.0
    }
}

/// A filer known to EDGAR.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Central Index Key.
    pub cik: Cik,
    /// Registered company name.
    pub name: String,
    /// Ticker symbols, uppercased.
    pub tickers: BTreeSet<String>,
}

impl Company {
    /// Creates a company without tickers.
    #[must_use]
    pub fn new(cik: Cik, name: impl Into<String>) -> Self {
        Self {
            cik,
            name: name.into(),
            tickers: BTreeSet::new(),
        }
    }

    /// Adds a ticker symbol (uppercased).
    #[must_use]
    pub fn with_ticker(mut self, ticker: impl AsRef<str>) -> Self {
        self.tickers.insert(ticker.as_ref().to_uppercase());
        self
    }

    /// Returns the alphabetically first ticker, if any.
    #[must_use]
    pub fn primary_ticker(&self) -> Option<&str> {
        self.tickers.iter().next().map(String::as_str)
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primary_ticker() {
            Some(ticker) => write!(f, "{} (Ticker: {}, CIK: {})", self.name, ticker, self.cik),
            None => write!(f, "{} (CIK: {})", self.name, self.cik),
        }
    }
}

/// A single normalized XBRL fact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConceptFact {
    /// Taxonomy namespace (e.g., "us-gaap").
    pub taxonomy: String,
    /// Concept tag within the taxonomy (e.g., "Assets").
    pub tag: String,
    /// Human-readable label reported by the API.
    pub label: String,
    /// Reported value.
    pub value: f64,
    /// Unit of measure (e.g., "USD", "USD/shares"). Never coerced.
    pub unit: String,
    /// Start of the period; `None` for instant facts.
    pub period_start: Option<NaiveDate>,
    /// End of the period (or the instant).
    pub period_end: NaiveDate,
    /// Date the reporting filing was filed.
    pub filed_date: NaiveDate,
    /// Form type of the reporting filing (e.g., "10-K").
    pub form: String,
    /// Fiscal year of the reporting filing.
    pub fiscal_year: Option<i32>,
    /// Fiscal period of the reporting filing (e.g., "FY", "Q2").
    pub fiscal_period: Option<String>,
    /// Accession number of the reporting filing.
    pub accession: Option<String>,
}

impl ConceptFact {
    /// Returns true for point-in-time facts.
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        self.period_start.is_none()
    }

    /// Returns the period length in days for duration facts.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        self.period_start
            .map(|start| (self.period_end - start).num_days())
    }

    /// Returns the `taxonomy:tag` qualified name.
    #[must_use]
    pub fn qualified_tag(&self) -> String {
        format!("{}:{}", self.taxonomy, self.tag)
    }
}

/// Ordered line items of one statement for one period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Which statement the line items belong to.
    pub kind: StatementKind,
    /// Start of the period, when the line items are durations.
    pub period_start: Option<NaiveDate>,
    /// End of the period.
    pub period_end: NaiveDate,
    /// Line items in presentation order.
    pub facts: Vec<ConceptFact>,
}

impl StatementRecord {
    /// Creates an empty record.
    #[must_use]
    pub const fn new(kind: StatementKind, period_end: NaiveDate) -> Self {
        Self {
            kind,
            period_start: None,
            period_end,
            facts: Vec::new(),
        }
    }

    /// Returns the line item for a tag, if present.
    #[must_use]
    pub fn fact(&self, tag: &str) -> Option<&ConceptFact> {
        self.facts.iter().find(|f| f.tag == tag)
    }

    /// Returns the number of line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if there are no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// One row of a company's filing history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingMetadata {
    /// Accession number (e.g., "0000320193-23-000106").
    pub accession_number: String,
    /// Form type.
    pub form: String,
    /// Filing date as reported (YYYY-MM-DD).
    pub filing_date: String,
    /// Report period date as reported.
    pub report_date: String,
    /// Primary document file name.
    pub primary_document: String,
}

impl FilingMetadata {
    /// URL of the primary document in the EDGAR archive.
    #[must_use]
    pub fn primary_document_url(&self, cik: Cik) -> String {
        format!(
            "https://www.sec.gov/Archives/edgar/data/{}/{}/{}",
            cik.value(),
            self.accession_number.replace('-', ""),
            self.primary_document
        )
    }
}

/// Which statements to build and over how many periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatementRequest {
    /// Statement selector.
    pub statement_type: StatementType,
    /// Period selector.
    pub period_type: PeriodType,
    /// Number of most recent periods to keep per statement.
    pub num_periods: usize,
}

impl StatementRequest {
    /// Creates a request with the default period count for `period_type`.
    #[must_use]
    pub const fn new(statement_type: StatementType, period_type: PeriodType) -> Self {
        Self {
            statement_type,
            period_type,
            num_periods: period_type.default_periods(),
        }
    }

    /// Overrides the number of periods.
    #[must_use]
    pub const fn with_num_periods(mut self, num_periods: usize) -> Self {
        self.num_periods = num_periods;
        self
    }

    /// Checks the period count against the limit for the period type.
    pub fn validate(&self) -> Result<()> {
        let max = self.period_type.max_periods();
        if self.num_periods == 0 || self.num_periods > max {
            return Err(FilingsError::InvalidParameter(format!(
                "Number of {} periods must be between 1 and {max}, got {}",
                self.period_type, self.num_periods
            )));
        }
        Ok(())
    }
}
