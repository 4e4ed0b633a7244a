use chrono::NaiveDate;
use filings_core::{FilingsError, Result, StatementRecord};
use serde::Serialize;

use crate::context::ExportContext;

/// One fact per row.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    company: &'a str,
    cik: String,
    statement: &'static str,
    period_start: Option<NaiveDate>,
    period_end: NaiveDate,
    taxonomy: &'a str,
    tag: &'a str,
    label: &'a str,
    value: f64,
    unit: &'a str,
    form: &'a str,
    filed: NaiveDate,
}

/// Render records in long format.
pub(crate) fn to_csv(ctx: &ExportContext, records: &[StatementRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let cik = ctx.cik().to_string();

    for record in records {
        for fact in &record.facts {
            wtr.serialize(CsvRow {
                company: &ctx.company.name,
                cik: cik.clone(),
                statement: record.kind.title(),
                period_start: fact.period_start,
                period_end: fact.period_end,
                taxonomy: &fact.taxonomy,
                tag: &fact.tag,
                label: &fact.label,
                value: fact.value,
                unit: &fact.unit,
                form: &fact.form,
                filed: fact.filed_date,
            })
            .map_err(|e| FilingsError::Export(e.to_string()))?;
        }
    }

    wtr.into_inner()
        .map_err(|e| FilingsError::Export(e.into_error().to_string()))
}
