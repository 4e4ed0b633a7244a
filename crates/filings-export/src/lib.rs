#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Rendering of statement records as CSV, JSON, Excel or console tables.
//!
//! Every format is a pure function from an [`ExportContext`] and a slice of
//! [`StatementRecord`]s to bytes; [`export_to_path`] is the only function that
//! touches the filesystem.

use chrono::NaiveDate;
use filings_core::{FilingsError, OutputFormat, PeriodType, Result, StatementRecord, StatementType};
use std::path::Path;
use tracing::info;

/// Plain-text grid rendering.
pub mod console;
mod context;
mod csv_writer;
mod excel;
mod json;
/// Line-item by period grids.
pub mod table;

pub use console::{format_financial_number, to_console};
pub use context::ExportContext;
pub use table::{StatementTable, TableRow};

/// Render `records` in `format`.
///
/// # Errors
/// Returns [`FilingsError::Export`] if serialization fails.
pub fn export(
    ctx: &ExportContext,
    records: &[StatementRecord],
    format: OutputFormat,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => csv_writer::to_csv(ctx, records),
        OutputFormat::Json => json::to_json(ctx, records),
        OutputFormat::Excel => excel::to_excel(ctx, records),
        OutputFormat::Console => Ok(to_console(ctx, records).into_bytes()),
    }
}

/// Render `records` and write them to `path`, creating parent directories.
///
/// # Errors
/// Returns [`FilingsError::Export`] if serialization fails or
/// [`FilingsError::Io`] if the file cannot be written.
pub fn export_to_path(
    ctx: &ExportContext,
    records: &[StatementRecord],
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let bytes = export(ctx, records, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Wrote {} output", format);
    Ok(())
}

/// Default output file name: `{ticker}_{statement}_{period}_{YYYYMMDD}.{ext}`.
///
/// # Errors
/// Returns [`FilingsError::UnsupportedFormat`] for formats that are not
/// written to files.
pub fn default_file_name(
    ticker: &str,
    statement_type: StatementType,
    period_type: PeriodType,
    date: NaiveDate,
    format: OutputFormat,
) -> Result<String> {
    let extension = format
        .extension()
        .ok_or_else(|| FilingsError::UnsupportedFormat(format!("{format} has no output file")))?;
    Ok(format!(
        "{}_{}_{}_{}.{}",
        ticker.to_lowercase(),
        statement_type.code().to_lowercase(),
        period_type.as_str(),
        date.format("%Y%m%d"),
        extension
    ))
}
