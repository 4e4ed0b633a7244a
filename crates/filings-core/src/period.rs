//! Reporting period selector.
//!
//! This module defines [`PeriodType`] and the rules deciding which facts
//! belong to an annual, quarterly or year-to-date statement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::{
    error::{FilingsError, Result},
    types::ConceptFact,
};

const ANNUAL_FORMS: &[&str] = &["10-K", "10-KT", "20-F", "40-F"];
const QUARTERLY_FORMS: &[&str] = &["10-Q", "10-QT"];

const ANNUAL_DAYS: RangeInclusive<i64> = 300..=380;
const QUARTER_DAYS: RangeInclusive<i64> = 70..=120;
const YTD_DAYS: RangeInclusive<i64> = 121..=300;

/// Returns true for annual report forms and their amendments.
#[must_use]
pub fn is_annual_form(form: &str) -> bool {
    let base = form.strip_suffix("/A").unwrap_or(form);
    ANNUAL_FORMS.contains(&base)
}

/// Returns true for quarterly report forms and their amendments.
#[must_use]
pub fn is_quarterly_form(form: &str) -> bool {
    let base = form.strip_suffix("/A").unwrap_or(form);
    QUARTERLY_FORMS.contains(&base)
}

/// Period type for financial statements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Fiscal-year periods from annual reports.
    #[default]
    Annual,
    /// Three-month periods.
    Quarterly,
    /// Year-to-date periods from quarterly reports.
    Ytd,
}

impl PeriodType {
    /// All period types.
    pub const ALL: [Self; 3] = [Self::Annual, Self::Quarterly, Self::Ytd];

    /// Returns the lowercase name used on the command line and in file names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
            Self::Ytd => "ytd",
        }
    }

    /// Number of periods fetched when none is requested.
    #[must_use]
    pub const fn default_periods(&self) -> usize {
        match self {
            Self::Annual => 3,
            Self::Quarterly | Self::Ytd => 4,
        }
    }

    /// Largest number of periods that may be requested.
    #[must_use]
    pub const fn max_periods(&self) -> usize {
        match self {
            Self::Annual => 10,
            Self::Quarterly | Self::Ytd => 40,
        }
    }

    /// Returns true if `fact` belongs to a statement of this period type.
    ///
    /// Instant facts are kept when they come from a filing of the matching
    /// cadence. Duration facts are classified by their length.
    #[must_use]
    pub fn matches(&self, fact: &ConceptFact) -> bool {
        match self {
            Self::Annual => {
                let fiscal_year_end = fact.fiscal_period.as_deref().is_none_or(|fp| fp == "FY");
                is_annual_form(&fact.form)
                    && fiscal_year_end
                    && fact
                        .duration_days()
                        .is_none_or(|days| ANNUAL_DAYS.contains(&days))
            }
            Self::Quarterly => match fact.duration_days() {
                None => is_quarterly_form(&fact.form),
                Some(days) => QUARTER_DAYS.contains(&days),
            },
            Self::Ytd => {
                is_quarterly_form(&fact.form)
                    && fact
                        .duration_days()
                        .is_none_or(|days| YTD_DAYS.contains(&days))
            }
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = FilingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "a" | "fy" => Ok(Self::Annual),
            "quarterly" | "q" => Ok(Self::Quarterly),
            "ytd" => Ok(Self::Ytd),
            other => Err(FilingsError::InvalidParameter(format!(
                "Unknown period type '{other}' (expected annual, quarterly or ytd)"
            ))),
        }
    }
}
