//! Statement kinds and the statement type selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FilingsError, Result};

/// One kind of financial statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementKind {
    /// Statement of financial position.
    BalanceSheet,
    /// Statement of operations.
    IncomeStatement,
    /// Statement of cash flows.
    CashFlow,
    /// Statement of stockholders' equity.
    Equity,
    /// Statement of comprehensive income.
    ComprehensiveIncome,
}

impl StatementKind {
    /// All statement kinds in presentation order.
    pub const ALL: [Self; 5] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlow,
        Self::Equity,
        Self::ComprehensiveIncome,
    ];

    /// Two-letter code (e.g., "BS").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::IncomeStatement => "IS",
            Self::CashFlow => "CF",
            Self::Equity => "EQ",
            Self::ComprehensiveIncome => "CI",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlow => "Cash Flow Statement",
            Self::Equity => "Statement of Stockholders' Equity",
            Self::ComprehensiveIncome => "Statement of Comprehensive Income",
        }
    }

    /// Short name, fits the 31 character worksheet name limit.
    #[must_use]
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlow => "Cash Flow",
            Self::Equity => "Equity",
            Self::ComprehensiveIncome => "Comprehensive Income",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Which statements a request asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementType {
    /// Balance sheet only.
    #[serde(rename = "BS")]
    BalanceSheet,
    /// Income statement only.
    #[serde(rename = "IS")]
    IncomeStatement,
    /// Cash flow statement only.
    #[serde(rename = "CF")]
    CashFlow,
    /// Statement of stockholders' equity only.
    #[serde(rename = "EQ")]
    Equity,
    /// Statement of comprehensive income only.
    #[serde(rename = "CI")]
    ComprehensiveIncome,
    /// Every statement kind.
    #[default]
    #[serde(rename = "ALL")]
    All,
}

impl StatementType {
    /// All selectors, in the order prompts list them.
    pub const ALL: [Self; 6] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlow,
        Self::Equity,
        Self::ComprehensiveIncome,
        Self::All,
    ];

    /// Returns the statement kinds this selector expands to.
    #[must_use]
    pub const fn kinds(&self) -> &'static [StatementKind] {
        match self {
            Self::BalanceSheet => &[StatementKind::BalanceSheet],
            Self::IncomeStatement => &[StatementKind::IncomeStatement],
            Self::CashFlow => &[StatementKind::CashFlow],
            Self::Equity => &[StatementKind::Equity],
            Self::ComprehensiveIncome => &[StatementKind::ComprehensiveIncome],
            Self::All => &StatementKind::ALL,
        }
    }

    /// Returns true if `kind` is part of this selection.
    #[must_use]
    pub fn includes(&self, kind: StatementKind) -> bool {
        self.kinds().contains(&kind)
    }

    /// Command-line code (e.g., "BS", "ALL").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::IncomeStatement => "IS",
            Self::CashFlow => "CF",
            Self::Equity => "EQ",
            Self::ComprehensiveIncome => "CI",
            Self::All => "ALL",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::BalanceSheet => StatementKind::BalanceSheet.title(),
            Self::IncomeStatement => StatementKind::IncomeStatement.title(),
            Self::CashFlow => StatementKind::CashFlow.title(),
            Self::Equity => StatementKind::Equity.title(),
            Self::ComprehensiveIncome => StatementKind::ComprehensiveIncome.title(),
            Self::All => "All Statements",
        }
    }

    /// Short name, fit for a worksheet tab.
    #[must_use]
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::BalanceSheet => StatementKind::BalanceSheet.short_name(),
            Self::IncomeStatement => StatementKind::IncomeStatement.short_name(),
            Self::CashFlow => StatementKind::CashFlow.short_name(),
            Self::Equity => StatementKind::Equity.short_name(),
            Self::ComprehensiveIncome => StatementKind::ComprehensiveIncome.short_name(),
            Self::All => "All Statements",
        }
    }
}

impl From<StatementKind> for StatementType {
    fn from(kind: StatementKind) -> Self {
        match kind {
            StatementKind::BalanceSheet => Self::BalanceSheet,
            StatementKind::IncomeStatement => Self::IncomeStatement,
            StatementKind::CashFlow => Self::CashFlow,
            StatementKind::Equity => Self::Equity,
            StatementKind::ComprehensiveIncome => Self::ComprehensiveIncome,
        }
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StatementType {
    type Err = FilingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BS" => Ok(Self::BalanceSheet),
            "IS" => Ok(Self::IncomeStatement),
            "CF" => Ok(Self::CashFlow),
            "EQ" => Ok(Self::Equity),
            "CI" => Ok(Self::ComprehensiveIncome),
            "ALL" => Ok(Self::All),
            other => Err(FilingsError::InvalidParameter(format!(
                "Unknown statement type '{other}' (expected BS, IS, CF, EQ, CI or ALL)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_expands_to_every_kind() {
        assert_eq!(StatementType::All.kinds(), &StatementKind::ALL);
        for kind in StatementKind::ALL {
            assert!(StatementType::All.includes(kind));
            assert_eq!(StatementType::from(kind).kinds(), &[kind]);
        }
    }

    #[test]
    fn test_parse_codes() {
        for statement_type in StatementType::ALL {
            let parsed: StatementType = statement_type.code().to_lowercase().parse().unwrap();
            assert_eq!(parsed, statement_type);
        }
        assert!("XX".parse::<StatementType>().is_err());
    }

    #[test]
    fn test_titles() {
        assert_eq!(
            StatementType::Equity.title(),
            "Statement of Stockholders' Equity"
        );
        assert_eq!(StatementKind::CashFlow.title(), "Cash Flow Statement");
        assert!(StatementKind::ALL.iter().all(|k| k.short_name().len() <= 31));
        assert!(StatementType::ALL.iter().all(|t| t.short_name().len() <= 31));
        assert_eq!(StatementType::Equity.short_name(), "Equity");
    }
}
