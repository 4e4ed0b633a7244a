use clap::Parser;
use filings_core::{Cik, OutputFormat, PeriodType, StatementType};
use filings_edgar::config::{DEFAULT_REQUESTS_PER_SECOND, DEFAULT_USER_AGENT};
use std::path::PathBuf;

/// One day, in seconds.
const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

#[derive(Debug, Parser)]
#[command(name = "filings")]
#[command(about = "Retrieve financial statements from SEC EDGAR", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Company name or ticker
    #[arg(short, long)]
    pub(crate) company: Option<String>,

    /// Company CIK number (overrides --company)
    #[arg(long)]
    pub(crate) cik: Option<Cik>,

    /// Statement to extract: BS, IS, CF, EQ, CI or ALL
    #[arg(short, long, default_value = "ALL")]
    pub(crate) statement_type: StatementType,

    /// Reporting period: annual, quarterly or ytd
    #[arg(short, long, default_value = "annual")]
    pub(crate) period_type: PeriodType,

    /// Number of periods (default: 3 annual, 4 quarterly/ytd)
    #[arg(short, long)]
    pub(crate) num_periods: Option<usize>,

    /// Output format: csv, json, excel or console
    #[arg(short = 'f', long, default_value = "csv")]
    pub(crate) output_format: OutputFormat,

    /// Output file path (default: {ticker}_{statement}_{period}_{date}.{ext})
    #[arg(short, long)]
    pub(crate) output_file: Option<PathBuf>,

    /// Only fetch this concept, e.g. us-gaap:Assets (repeatable)
    #[arg(long = "concept", value_name = "TAXONOMY:TAG", value_parser = parse_concept)]
    pub(crate) concepts: Vec<(String, String)>,

    /// Print recent filings for the company
    #[arg(long)]
    pub(crate) list_filings: bool,

    /// User-Agent sent to the SEC; must include a contact address
    #[arg(long, env = "FILINGS_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub(crate) user_agent: String,

    /// Cache directory (default: the platform cache dir)
    #[arg(long, env = "FILINGS_CACHE_DIR")]
    pub(crate) cache_dir: Option<PathBuf>,

    /// Cache lifetime in seconds
    #[arg(long, env = "FILINGS_CACHE_TTL", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub(crate) cache_ttl: u64,

    /// Disable caching (always fetch fresh data)
    #[arg(long)]
    pub(crate) no_cache: bool,

    /// Remove every cached response before running
    #[arg(long)]
    pub(crate) clear_cache: bool,

    /// Maximum requests per second
    #[arg(long, env = "FILINGS_RATE_LIMIT", default_value_t = DEFAULT_REQUESTS_PER_SECOND)]
    pub(crate) rate_limit: u32,

    /// Enable debug logging
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Parse `taxonomy:tag`.
fn parse_concept(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((taxonomy, tag)) if !taxonomy.trim().is_empty() && !tag.trim().is_empty() => {
            Ok((taxonomy.trim().to_string(), tag.trim().to_string()))
        }
        _ => Err(format!("expected TAXONOMY:TAG, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("filings").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["-c", "AAPL"]);
        assert_eq!(cli.company.as_deref(), Some("AAPL"));
        assert_eq!(cli.statement_type, StatementType::All);
        assert_eq!(cli.period_type, PeriodType::Annual);
        assert_eq!(cli.output_format, OutputFormat::Csv);
        assert!(cli.num_periods.is_none());
        assert!(cli.concepts.is_empty());
    }

    #[test]
    fn test_full_flags() {
        let cli = parse(&[
            "--cik",
            "320193",
            "-s",
            "bs",
            "-p",
            "quarterly",
            "-n",
            "8",
            "-f",
            "excel",
            "-o",
            "out/aapl.xlsx",
            "--concept",
            "us-gaap:Assets",
            "--concept",
            "us-gaap:Liabilities",
            "--list-filings",
            "--no-cache",
            "-v",
        ]);
        assert_eq!(cli.cik, Some(Cik::try_from(320_193_u32).unwrap()));
        assert_eq!(cli.statement_type, StatementType::BalanceSheet);
        assert_eq!(cli.period_type, PeriodType::Quarterly);
        assert_eq!(cli.num_periods, Some(8));
        assert_eq!(cli.output_format, OutputFormat::Excel);
        assert_eq!(cli.concepts.len(), 2);
        assert_eq!(cli.concepts[1], ("us-gaap".to_string(), "Liabilities".to_string()));
        assert!(cli.list_filings && cli.no_cache && cli.verbose);
    }

    #[test]
    fn test_rejects_closed_enum_values() {
        let bad = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("filings").chain(args.iter().copied())).is_err()
        };
        assert!(bad(&["-s", "XX"]));
        assert!(bad(&["-p", "monthly"]));
        assert!(bad(&["-f", "pdf"]));
        assert!(bad(&["--cik", "abc"]));
        assert!(bad(&["--concept", "Assets"]));
    }

    #[test]
    fn test_parse_concept() {
        assert_eq!(
            parse_concept("ifrs-full:Revenue").unwrap(),
            ("ifrs-full".to_string(), "Revenue".to_string())
        );
        assert!(parse_concept(":Assets").is_err());
        assert!(parse_concept("us-gaap:").is_err());
    }
}
