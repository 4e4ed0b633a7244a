//! Statement assembly from normalized facts.

use chrono::NaiveDate;
use filings_core::{ConceptFact, PeriodType, StatementKind, StatementRecord, StatementType};
use std::collections::BTreeMap;
use tracing::debug;

use crate::concepts::{self, ConceptDefinition};

type LineItem<'a> = (&'static ConceptDefinition, &'a ConceptFact);

/// Build statement records from normalized facts.
///
/// Keeps facts whose concept is on a requested statement and whose period
/// matches `period_type`, groups them by (statement, period end) and keeps the
/// `num_periods` most recent period ends per statement. Line items follow the
/// concept table's section and line order. Records are returned oldest period
/// first, then by statement kind.
#[must_use]
pub fn build_statements(
    facts: &[ConceptFact],
    statement_type: StatementType,
    period_type: PeriodType,
    num_periods: usize,
) -> Vec<StatementRecord> {
    let mut groups: BTreeMap<StatementKind, BTreeMap<NaiveDate, Vec<LineItem<'_>>>> =
        BTreeMap::new();
    let mut unclassified = 0usize;

    for fact in facts {
        let Some(definition) = concepts::classify(fact) else {
            unclassified += 1;
            continue;
        };
        if !statement_type.includes(definition.kind) || !period_type.matches(fact) {
            continue;
        }
        groups
            .entry(definition.kind)
            .or_default()
            .entry(fact.period_end)
            .or_default()
            .push((definition, fact));
    }

    debug!(
        unclassified,
        statements = groups.len(),
        "Grouped facts into statements"
    );

    let mut records: Vec<StatementRecord> = groups
        .into_iter()
        .flat_map(|(kind, periods)| {
            periods
                .into_iter()
                .rev()
                .take(num_periods)
                .map(move |(period_end, items)| assemble(kind, period_end, items))
        })
        .collect();

    records.sort_by(|a, b| {
        a.period_end
            .cmp(&b.period_end)
            .then_with(|| a.kind.cmp(&b.kind))
    });
    records
}

fn assemble(kind: StatementKind, period_end: NaiveDate, mut items: Vec<LineItem<'_>>) -> StatementRecord {
    items.sort_by(|(da, fa), (db, fb)| {
        (da.section, da.order, da.taxonomy, da.tag, &fa.unit)
            .cmp(&(db.section, db.order, db.taxonomy, db.tag, &fb.unit))
            .then_with(|| fb.filed_date.cmp(&fa.filed_date))
    });
    // one line per concept and unit, latest filing first after the sort
    items.dedup_by(|(da, fa), (db, fb)| {
        da.taxonomy == db.taxonomy && da.tag == db.tag && fa.unit == fb.unit
    });

    let facts: Vec<ConceptFact> = items
        .into_iter()
        .map(|(definition, fact)| ConceptFact {
            label: definition.label.to_string(),
            ..fact.clone()
        })
        .collect();

    StatementRecord {
        kind,
        period_start: facts.iter().filter_map(|f| f.period_start).min(),
        period_end,
        facts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fact(tag: &str, start: Option<&str>, end: &str, value: f64) -> ConceptFact {
        ConceptFact {
            taxonomy: "us-gaap".to_string(),
            tag: tag.to_string(),
            label: tag.to_string(),
            value,
            unit: "USD".to_string(),
            period_start: start.map(date),
            period_end: date(end),
            filed_date: date("2024-11-01"),
            form: "10-K".to_string(),
            fiscal_year: Some(2024),
            fiscal_period: Some("FY".to_string()),
            accession: None,
        }
    }

    fn sample() -> Vec<ConceptFact> {
        vec![
            fact("Assets", None, "2021-09-25", 351.0),
            fact("Assets", None, "2022-09-24", 352.0),
            fact("Assets", None, "2023-09-30", 352.5),
            fact("Assets", None, "2024-09-28", 365.0),
            fact("AssetsCurrent", None, "2024-09-28", 152.0),
            fact("Liabilities", None, "2024-09-28", 308.0),
            fact("Revenues", Some("2023-10-01"), "2024-09-28", 391.0),
            fact("Revenues", Some("2022-09-25"), "2023-09-30", 383.0),
            fact("NetIncomeLoss", Some("2023-10-01"), "2024-09-28", 93.7),
            fact("SomeCustomExtensionTag", None, "2024-09-28", 1.0),
        ]
    }

    #[test]
    fn test_keeps_most_recent_periods_ascending() {
        let records = build_statements(
            &sample(),
            StatementType::BalanceSheet,
            PeriodType::Annual,
            3,
        );

        let ends: Vec<_> = records.iter().map(|r| r.period_end).collect();
        assert_eq!(
            ends,
            vec![date("2022-09-24"), date("2023-09-30"), date("2024-09-28")]
        );
        assert!(records.iter().all(|r| r.kind == StatementKind::BalanceSheet));
    }

    #[test]
    fn test_line_items_follow_section_order() {
        let records = build_statements(
            &sample(),
            StatementType::BalanceSheet,
            PeriodType::Annual,
            1,
        );
        assert_eq!(records.len(), 1);

        let tags: Vec<_> = records[0].facts.iter().map(|f| f.tag.as_str()).collect();
        assert_eq!(tags, vec!["Assets", "AssetsCurrent", "Liabilities"]);
        assert_eq!(records[0].facts[0].label, "Total Assets");
        assert!(records[0].period_start.is_none());
    }

    #[test]
    fn test_all_groups_by_kind_and_skips_unknown_tags() {
        let records = build_statements(&sample(), StatementType::All, PeriodType::Annual, 1);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, StatementKind::BalanceSheet);
        assert_eq!(records[1].kind, StatementKind::IncomeStatement);
        assert_eq!(records[1].period_start, Some(date("2023-10-01")));
        assert!(
            records
                .iter()
                .flat_map(|r| &r.facts)
                .all(|f| f.tag != "SomeCustomExtensionTag")
        );
    }

    #[test]
    fn test_period_type_filters_facts() {
        let mut facts = sample();
        let mut quarter = fact("Revenues", Some("2024-06-30"), "2024-09-28", 94.9);
        quarter.form = "10-K".to_string();
        facts.push(quarter);

        let quarterly = build_statements(
            &facts,
            StatementType::IncomeStatement,
            PeriodType::Quarterly,
            4,
        );
        assert_eq!(quarterly.len(), 1);
        assert_eq!(quarterly[0].facts[0].value, 94.9);
    }

    #[test]
    fn test_same_concept_keeps_latest_filing() {
        let mut restated = fact("Assets", None, "2024-09-28", 366.0);
        restated.filed_date = date("2025-01-15");
        let mut facts = sample();
        facts.push(restated);

        let records = build_statements(&facts, StatementType::BalanceSheet, PeriodType::Annual, 1);
        let assets = records[0].fact("Assets").unwrap();
        assert_eq!(assets.value, 366.0);
        assert_eq!(records[0].len(), 3);
    }

    const MIXED_FILINGS: &str = r#"{"facts": {"us-gaap": {
        "Assets": {"label": "Assets", "units": {"USD": [
            {"end": "2023-09-30", "val": 352.5, "fy": 2023, "fp": "FY", "form": "10-K", "filed": "2023-11-03"},
            {"end": "2024-06-29", "val": 331.6, "fy": 2024, "fp": "Q3", "form": "10-Q", "filed": "2024-08-02"},
            {"end": "2024-09-28", "val": 365.0, "fy": 2024, "fp": "FY", "form": "10-K", "filed": "2024-11-01"},
            {"end": "2024-09-28", "val": 365.0, "fy": 2025, "fp": "Q1", "form": "10-Q", "filed": "2025-01-31"},
            {"end": "2024-12-28", "val": 344.1, "fy": 2025, "fp": "Q1", "form": "10-Q", "filed": "2025-01-31"}
        ]}},
        "Revenues": {"label": "Revenues", "units": {"USD": [
            {"start": "2023-10-01", "end": "2023-12-30", "val": 119.5, "fy": 2024, "fp": "Q1", "form": "10-Q", "filed": "2024-02-02"},
            {"start": "2023-10-01", "end": "2024-09-28", "val": 391.0, "fy": 2024, "fp": "FY", "form": "10-K", "filed": "2024-11-01"},
            {"start": "2023-10-01", "end": "2023-12-30", "val": 119.6, "fy": 2025, "fp": "Q1", "form": "10-Q", "filed": "2025-01-31"},
            {"start": "2024-09-29", "end": "2024-12-28", "val": 124.3, "fy": 2025, "fp": "Q1", "form": "10-Q", "filed": "2025-01-31"}
        ]}}
    }}}"#;

    fn mixed_facts() -> Vec<ConceptFact> {
        crate::normalize::parse_company_facts(MIXED_FILINGS.as_bytes()).unwrap()
    }

    #[test]
    fn test_annual_keeps_year_end_repeated_in_later_quarter() {
        let records = build_statements(
            &mixed_facts(),
            StatementType::BalanceSheet,
            PeriodType::Annual,
            3,
        );

        let ends: Vec<_> = records.iter().map(|r| r.period_end).collect();
        assert_eq!(ends, vec![date("2023-09-30"), date("2024-09-28")]);
        let latest = records[1].fact("Assets").unwrap();
        assert_eq!(latest.form, "10-K");
        assert_eq!(latest.value, 365.0);
    }

    #[test]
    fn test_quarterly_over_mixed_filings() {
        let facts = mixed_facts();

        let balance = build_statements(&facts, StatementType::BalanceSheet, PeriodType::Quarterly, 4);
        let ends: Vec<_> = balance.iter().map(|r| r.period_end).collect();
        assert_eq!(
            ends,
            vec![date("2024-06-29"), date("2024-09-28"), date("2024-12-28")]
        );
        assert!(balance.iter().flat_map(|r| &r.facts).all(|f| f.form == "10-Q"));

        let income = build_statements(&facts, StatementType::IncomeStatement, PeriodType::Quarterly, 4);
        let ends: Vec<_> = income.iter().map(|r| r.period_end).collect();
        assert_eq!(ends, vec![date("2023-12-30"), date("2024-12-28")]);
        assert_eq!(income[0].fact("Revenues").unwrap().value, 119.6);
    }

    #[test]
    fn test_annual_income_ignores_quarters() {
        let records = build_statements(
            &mixed_facts(),
            StatementType::IncomeStatement,
            PeriodType::Annual,
            3,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].period_end, date("2024-09-28"));
        assert_eq!(records[0].fact("Revenues").unwrap().value, 391.0);
    }

    #[test]
    fn test_no_matching_facts() {
        assert!(build_statements(&sample(), StatementType::CashFlow, PeriodType::Annual, 3).is_empty());
        assert!(build_statements(&[], StatementType::All, PeriodType::Annual, 3).is_empty());
    }
}
