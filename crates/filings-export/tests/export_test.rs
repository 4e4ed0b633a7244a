//! Integration tests for the output formats.

use chrono::{NaiveDate, TimeZone, Utc};
use filings_core::{
    Cik, Company, ConceptFact, FilingsError, OutputFormat, PeriodType, StatementKind,
    StatementRecord, StatementType,
};
use filings_export::{ExportContext, default_file_name, export, export_to_path};
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fact(tag: &str, label: &str, start: Option<NaiveDate>, end: NaiveDate, value: f64) -> ConceptFact {
    ConceptFact {
        taxonomy: "us-gaap".to_string(),
        tag: tag.to_string(),
        label: label.to_string(),
        value,
        unit: "USD".to_string(),
        period_start: start,
        period_end: end,
        filed_date: date(2024, 11, 1),
        form: "10-K".to_string(),
        fiscal_year: Some(2024),
        fiscal_period: Some("FY".to_string()),
        accession: Some("0000320193-24-000123".to_string()),
    }
}

fn context() -> ExportContext {
    let company = Company::new(Cik::try_from(320_193_u32).unwrap(), "Apple Inc.").with_ticker("AAPL");
    ExportContext::new(company, StatementType::All, PeriodType::Annual)
        .with_generated_at(Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap())
}

fn records() -> Vec<StatementRecord> {
    let fy23 = date(2023, 9, 30);
    let fy24 = date(2024, 9, 28);
    vec![
        StatementRecord {
            facts: vec![fact("Assets", "Total Assets", None, fy23, 352_583_000_000.0)],
            ..StatementRecord::new(StatementKind::BalanceSheet, fy23)
        },
        StatementRecord {
            facts: vec![
                fact("Assets", "Total Assets", None, fy24, 364_980_000_000.0),
                fact("Liabilities", "Total Liabilities", None, fy24, 308_030_000_000.0),
            ],
            ..StatementRecord::new(StatementKind::BalanceSheet, fy24)
        },
        StatementRecord {
            period_start: Some(date(2023, 10, 1)),
            facts: vec![fact(
                "Revenues",
                "Total Revenue",
                Some(date(2023, 10, 1)),
                fy24,
                391_035_000_000.0,
            )],
            ..StatementRecord::new(StatementKind::IncomeStatement, fy24)
        },
    ]
}

#[test]
fn test_csv_is_long_format() {
    let bytes = export(&context(), &records(), OutputFormat::Csv).unwrap();

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec![
            "company", "cik", "statement", "period_start", "period_end", "taxonomy", "tag",
            "label", "value", "unit", "form", "filed"
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[0][1], "0000320193");
    assert_eq!(&rows[0][2], "Balance Sheet");
    assert_eq!(&rows[0][3], "");
    assert_eq!(&rows[3][3], "2023-10-01");
    assert_eq!(&rows[3][7], "Total Revenue");
}

#[test]
fn test_json_has_metadata_and_line_items() {
    let bytes = export(&context(), &records(), OutputFormat::Json).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(doc["metadata"]["company"], "Apple Inc.");
    assert_eq!(doc["metadata"]["cik"], "0000320193");
    assert_eq!(doc["metadata"]["period_type"], "annual");
    assert_eq!(doc["metadata"]["statement_type"], StatementType::All.title());

    let statements = doc["statements"].as_array().unwrap();
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[1]["period_end"], "2024-09-28");
    assert_eq!(statements[1]["line_items"][1]["section"], "Liabilities");
    assert_eq!(statements[2]["line_items"][0]["value"], 391_035_000_000.0);
}

#[test]
fn test_excel_is_a_workbook() {
    let bytes = export(&context(), &records(), OutputFormat::Excel).unwrap();
    // xlsx files are zip archives
    assert_eq!(&bytes[..2], b"PK");

    let empty = export(&context(), &[], OutputFormat::Excel).unwrap();
    assert_eq!(&empty[..2], b"PK");
}

#[rstest]
#[case(StatementType::BalanceSheet)]
#[case(StatementType::IncomeStatement)]
#[case(StatementType::CashFlow)]
#[case(StatementType::Equity)]
#[case(StatementType::ComprehensiveIncome)]
#[case(StatementType::All)]
fn test_empty_excel_for_every_statement_type(#[case] statement_type: StatementType) {
    let company = Company::new(Cik::try_from(320_193_u32).unwrap(), "Apple Inc.");
    let ctx = ExportContext::new(company, statement_type, PeriodType::Annual);

    let bytes = export(&ctx, &[], OutputFormat::Excel).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_console_renders_one_grid_per_statement() {
    let bytes = export(&context(), &records(), OutputFormat::Console).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("Apple Inc. - Balance Sheet"));
    assert!(text.contains("Apple Inc. - Income Statement"));
    assert!(text.contains("--- Assets ---"));
    assert!(text.contains("364.98B"));
    assert!(text.contains("| 2023-09-30 | 2024-09-28 |"));
}

#[test]
fn test_export_to_path_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out").join("aapl.json");

    export_to_path(&context(), &records(), OutputFormat::Json, &path).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert!(serde_json::from_slice::<serde_json::Value>(&written).is_ok());
}

#[rstest]
#[case(OutputFormat::Csv, StatementType::BalanceSheet, "aapl_bs_annual_20241018.csv")]
#[case(OutputFormat::Json, StatementType::All, "aapl_all_annual_20241018.json")]
#[case(OutputFormat::Excel, StatementType::CashFlow, "aapl_cf_annual_20241018.xlsx")]
fn test_default_file_name(
    #[case] format: OutputFormat,
    #[case] statement_type: StatementType,
    #[case] expected: &str,
) {
    let name = default_file_name(
        "AAPL",
        statement_type,
        PeriodType::Annual,
        date(2024, 10, 18),
        format,
    )
    .unwrap();
    assert_eq!(name, expected);
}

#[test]
fn test_console_has_no_file_name() {
    let err = default_file_name(
        "AAPL",
        StatementType::All,
        PeriodType::Annual,
        date(2024, 10, 18),
        OutputFormat::Console,
    )
    .unwrap_err();
    assert!(matches!(err, FilingsError::UnsupportedFormat(_)));
}
