// =============================================================================
// SEC API Response Types
// =============================================================================

use filings_core::{Cik, Company, FilingMetadata, FilingsError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Company ticker information from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTickerInfo {
    /// CIK as a number (SEC returns this as an integer)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
    /// Company name
    title: String,
}

/// Parse `company_tickers.json` into companies, grouping tickers by CIK.
///
/// Companies keep the table's order (the SEC lists the most active issuers
/// first). Rows with an unusable CIK are skipped.
pub(crate) fn parse_company_tickers(body: &[u8]) -> Result<Vec<Company>> {
    let rows: HashMap<String, CompanyTickerInfo> = serde_json::from_slice(body)
        .map_err(|e| FilingsError::MalformedResponse(format!("company tickers: {e}")))?;

    let ordered: BTreeMap<(usize, String), CompanyTickerInfo> = rows
        .into_iter()
        .map(|(index, row)| ((index.parse().unwrap_or(usize::MAX), index), row))
        .collect();

    let mut companies: Vec<Company> = Vec::new();
    let mut by_cik: HashMap<Cik, usize> = HashMap::new();

    for row in ordered.into_values() {
        let Ok(cik) = Cik::new(row.cik_str) else {
            debug!(cik = row.cik_str, "Skipping ticker row with invalid CIK");
            continue;
        };
        match by_cik.get(&cik) {
            Some(&idx) => {
                companies[idx].tickers.insert(row.ticker.to_uppercase());
            }
            None => {
                by_cik.insert(cik, companies.len());
                companies.push(Company::new(cik, row.title).with_ticker(&row.ticker));
            }
        }
    }

    Ok(companies)
}

/// Company submissions/filings metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submissions {
    /// Company name
    #[serde(default)]
    pub name: String,
    /// Ticker symbols
    #[serde(default)]
    pub tickers: Vec<String>,
    /// List of exchanges
    #[serde(default)]
    pub exchanges: Vec<String>,
    /// SIC description
    #[serde(default)]
    pub sic_description: Option<String>,
    /// Fiscal year end as MMDD
    #[serde(default)]
    pub fiscal_year_end: Option<String>,
    #[serde(default)]
    filings: Option<SubmissionFilings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SubmissionFilings {
    #[serde(default)]
    recent: Option<RecentFilings>,
}

/// Column-oriented recent filings block. Every column is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentFilings {
    #[serde(default)]
    accession_number: Vec<String>,
    #[serde(default)]
    form: Vec<String>,
    #[serde(default)]
    filing_date: Vec<String>,
    #[serde(default)]
    report_date: Vec<String>,
    #[serde(default)]
    primary_document: Vec<String>,
}

impl RecentFilings {
    fn len(&self) -> usize {
        [
            self.accession_number.len(),
            self.form.len(),
            self.filing_date.len(),
            self.report_date.len(),
            self.primary_document.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    fn row(&self, i: usize) -> FilingMetadata {
        let cell = |column: &[String]| column.get(i).cloned().unwrap_or_default();
        FilingMetadata {
            accession_number: cell(&self.accession_number),
            form: cell(&self.form),
            filing_date: cell(&self.filing_date),
            report_date: cell(&self.report_date),
            primary_document: cell(&self.primary_document),
        }
    }
}

impl Submissions {
    /// Parse a submissions document.
    pub(crate) fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| FilingsError::MalformedResponse(format!("submissions: {e}")))
    }

    /// The most recent filings, newest first, optionally restricted to one form.
    ///
    /// Returns an empty list when the document has no recent filings block.
    #[must_use]
    pub fn recent_filings(&self, form: Option<&str>, limit: usize) -> Vec<FilingMetadata> {
        let Some(recent) = self.filings.as_ref().and_then(|f| f.recent.as_ref()) else {
            return Vec::new();
        };

        (0..recent.len())
            .map(|i| recent.row(i))
            .filter(|filing| form.is_none_or(|wanted| filing.form.eq_ignore_ascii_case(wanted)))
            .take(limit)
            .collect()
    }
}
