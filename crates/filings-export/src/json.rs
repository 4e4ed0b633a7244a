use chrono::{DateTime, NaiveDate, Utc};
use filings_core::{FilingsError, Result, StatementRecord};
use filings_edgar::concepts;
use serde::Serialize;

use crate::context::ExportContext;

#[derive(Debug, Serialize)]
struct Document<'a> {
    metadata: Metadata<'a>,
    statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    company: &'a str,
    cik: String,
    tickers: Vec<&'a str>,
    statement_type: &'static str,
    period_type: &'static str,
    generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    statement: &'static str,
    period_start: Option<NaiveDate>,
    period_end: NaiveDate,
    line_items: Vec<LineItem<'a>>,
}

#[derive(Debug, Serialize)]
struct LineItem<'a> {
    section: Option<&'static str>,
    taxonomy: &'a str,
    tag: &'a str,
    label: &'a str,
    value: f64,
    unit: &'a str,
    form: &'a str,
    filed: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    fiscal_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fiscal_period: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accession: Option<&'a str>,
}

/// Render records as a pretty-printed JSON document.
pub(crate) fn to_json(ctx: &ExportContext, records: &[StatementRecord]) -> Result<Vec<u8>> {
    let document = Document {
        metadata: Metadata {
            company: &ctx.company.name,
            cik: ctx.cik().to_string(),
            tickers: ctx.company.tickers.iter().map(String::as_str).collect(),
            statement_type: ctx.statement_type.title(),
            period_type: ctx.period_type.as_str(),
            generated_at: ctx.generated_at,
        },
        statements: records
            .iter()
            .map(|record| Statement {
                statement: record.kind.title(),
                period_start: record.period_start,
                period_end: record.period_end,
                line_items: record
                    .facts
                    .iter()
                    .map(|fact| LineItem {
                        section: concepts::classify(fact).map(|d| d.section.title()),
                        taxonomy: &fact.taxonomy,
                        tag: &fact.tag,
                        label: &fact.label,
                        value: fact.value,
                        unit: &fact.unit,
                        form: &fact.form,
                        filed: fact.filed_date,
                        fiscal_year: fact.fiscal_year,
                        fiscal_period: fact.fiscal_period.as_deref(),
                        accession: fact.accession.as_deref(),
                    })
                    .collect(),
            })
            .collect(),
    };

    serde_json::to_vec_pretty(&document).map_err(|e| FilingsError::Export(e.to_string()))
}
