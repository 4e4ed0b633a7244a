//! Pivot statement records into line-item by period grids.

use chrono::NaiveDate;
use filings_core::{StatementKind, StatementRecord};
use filings_edgar::concepts::{self, Section};
use std::collections::BTreeMap;

/// One row of a statement grid.
#[derive(Clone, Debug, PartialEq)]
pub enum TableRow {
    /// Section header such as "Assets".
    Section(&'static str),
    /// A line item with one value per period column.
    Item {
        /// Display label.
        label: String,
        /// Unit of measure.
        unit: String,
        /// Values aligned with [`StatementTable::periods`].
        values: Vec<Option<f64>>,
    },
}

/// All periods of one statement kind as a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementTable {
    /// Statement kind.
    pub kind: StatementKind,
    /// Period end columns, oldest first.
    pub periods: Vec<NaiveDate>,
    /// Section headers and line items in display order.
    pub rows: Vec<TableRow>,
}

// unclassified rows sort after every section
type RowKey = (bool, Option<Section>, u16, String, String, String);

/// Build one grid per statement kind present in `records`.
pub fn tables(records: &[StatementRecord]) -> Vec<StatementTable> {
    let mut by_kind: BTreeMap<StatementKind, Vec<&StatementRecord>> = BTreeMap::new();
    for record in records {
        by_kind.entry(record.kind).or_default().push(record);
    }

    by_kind
        .into_iter()
        .map(|(kind, mut records)| {
            records.sort_by_key(|r| r.period_end);
            let periods: Vec<NaiveDate> = records.iter().map(|r| r.period_end).collect();

            let mut items: BTreeMap<RowKey, (String, Vec<Option<f64>>)> = BTreeMap::new();
            for (column, record) in records.iter().enumerate() {
                for fact in &record.facts {
                    let definition = concepts::classify(fact);
                    let key = (
                        definition.is_none(),
                        definition.map(|d| d.section),
                        definition.map_or(u16::MAX, |d| d.order),
                        fact.taxonomy.clone(),
                        fact.tag.clone(),
                        fact.unit.clone(),
                    );
                    let (_, values) = items
                        .entry(key)
                        .or_insert_with(|| (fact.label.clone(), vec![None; periods.len()]));
                    values[column].get_or_insert(fact.value);
                }
            }

            let mut rows = Vec::with_capacity(items.len());
            let mut current: Option<Section> = None;
            for ((_, section, _, _, _, unit), (label, values)) in items {
                if let Some(section) = section
                    && current != Some(section)
                {
                    rows.push(TableRow::Section(section.title()));
                    current = Some(section);
                }
                rows.push(TableRow::Item {
                    label,
                    unit,
                    values,
                });
            }

            StatementTable {
                kind,
                periods,
                rows,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use filings_core::ConceptFact;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fact(tag: &str, label: &str, end: &str, value: f64) -> ConceptFact {
        ConceptFact {
            taxonomy: "us-gaap".to_string(),
            tag: tag.to_string(),
            label: label.to_string(),
            value,
            unit: "USD".to_string(),
            period_start: None,
            period_end: date(end),
            filed_date: date("2024-11-01"),
            form: "10-K".to_string(),
            fiscal_year: None,
            fiscal_period: None,
            accession: None,
        }
    }

    fn record(end: &str, facts: Vec<ConceptFact>) -> StatementRecord {
        StatementRecord {
            facts,
            ..StatementRecord::new(StatementKind::BalanceSheet, date(end))
        }
    }

    #[test]
    fn test_pivot_aligns_values_by_period() {
        let records = vec![
            record(
                "2024-09-28",
                vec![
                    fact("Assets", "Total Assets", "2024-09-28", 365.0),
                    fact("Liabilities", "Total Liabilities", "2024-09-28", 308.0),
                ],
            ),
            record(
                "2023-09-30",
                vec![fact("Assets", "Total Assets", "2023-09-30", 352.5)],
            ),
        ];

        let tables = tables(&records);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.periods, vec![date("2023-09-30"), date("2024-09-28")]);
        assert_eq!(
            table.rows,
            vec![
                TableRow::Section("Assets"),
                TableRow::Item {
                    label: "Total Assets".to_string(),
                    unit: "USD".to_string(),
                    values: vec![Some(352.5), Some(365.0)],
                },
                TableRow::Section("Liabilities"),
                TableRow::Item {
                    label: "Total Liabilities".to_string(),
                    unit: "USD".to_string(),
                    values: vec![None, Some(308.0)],
                },
            ]
        );
    }

    #[test]
    fn test_unclassified_rows_come_last_without_section() {
        let records = vec![record(
            "2024-09-28",
            vec![
                fact("CustomWidgetReserve", "Custom Widget Reserve", "2024-09-28", 1.0),
                fact("Assets", "Total Assets", "2024-09-28", 365.0),
            ],
        )];

        let rows = &tables(&records)[0].rows;
        assert_eq!(rows.len(), 3);
        assert!(matches!(&rows[2], TableRow::Item { label, .. } if label == "Custom Widget Reserve"));
    }
}
