use chrono::{DateTime, Utc};
use filings_core::{Cik, Company, PeriodType, StatementType};

/// What was requested, carried into every output format.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportContext {
    /// The resolved company.
    pub company: Company,
    /// Requested statement selector.
    pub statement_type: StatementType,
    /// Requested period type.
    pub period_type: PeriodType,
    /// When the export was produced.
    pub generated_at: DateTime<Utc>,
}

impl ExportContext {
    /// Create a context stamped with the current time.
    pub fn new(company: Company, statement_type: StatementType, period_type: PeriodType) -> Self {
        Self {
            company,
            statement_type,
            period_type,
            generated_at: Utc::now(),
        }
    }

    /// Override the generation timestamp.
    #[must_use]
    pub const fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// The company's CIK.
    pub const fn cik(&self) -> Cik {
        self.company.cik
    }

    /// `"<Company> - <title>"` heading used by the console and Excel outputs.
    pub fn heading(&self, title: &str) -> String {
        format!("{} - {}", self.company.name, title)
    }
}
