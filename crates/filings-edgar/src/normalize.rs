//! XBRL fact normalization.
//!
//! Turns `companyfacts` and `companyconcept` documents into flat
//! [`ConceptFact`]s. Individual facts that cannot be read (missing dates,
//! non-numeric values) are skipped; only a document without its top-level
//! structure is an error.

use chrono::NaiveDate;
use filings_core::period::{is_annual_form, is_quarterly_form};
use filings_core::{ConceptFact, FilingsError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::concepts::humanize_tag;

/// One concept block: `{label, description, units: {unit: [fact]}}`.
#[derive(Debug, Deserialize)]
struct ConceptBlock {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    units: HashMap<String, Vec<Value>>,
}

/// A single fact value with metadata.
#[derive(Debug, Deserialize)]
struct RawFact {
    /// Start date of the period (duration facts only)
    #[serde(default)]
    start: Option<String>,
    /// End date of the period
    end: String,
    /// Value
    val: f64,
    /// Accession number
    #[serde(default)]
    accn: Option<String>,
    /// Fiscal year
    #[serde(default)]
    fy: Option<i32>,
    /// Fiscal period
    #[serde(default)]
    fp: Option<String>,
    /// Form type
    #[serde(default)]
    form: Option<String>,
    /// Filed date
    filed: String,
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl RawFact {
    fn into_fact(self, taxonomy: &str, tag: &str, label: &str, unit: &str) -> Option<ConceptFact> {
        let period_end = parse_date(&self.end)?;
        let filed_date = parse_date(&self.filed)?;
        let period_start = match self.start.as_deref() {
            Some(start) => Some(parse_date(start)?),
            None => None,
        };

        Some(ConceptFact {
            taxonomy: taxonomy.to_string(),
            tag: tag.to_string(),
            label: label.to_string(),
            value: self.val,
            unit: unit.to_string(),
            period_start,
            period_end,
            filed_date,
            form: self.form.unwrap_or_default(),
            fiscal_year: self.fy,
            fiscal_period: self.fp,
            accession: self.accn,
        })
    }
}

fn parse_document(body: &[u8], what: &str) -> Result<Value> {
    serde_json::from_slice(body)
        .map_err(|e| FilingsError::MalformedResponse(format!("{what}: {e}")))
}

/// Normalize a `companyfacts` document.
///
/// # Errors
/// Returns [`FilingsError::MalformedResponse`] if the body is not JSON or has
/// no `facts` object.
pub fn parse_company_facts(body: &[u8]) -> Result<Vec<ConceptFact>> {
    let doc = parse_document(body, "companyfacts")?;
    let taxonomies = doc
        .get("facts")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            FilingsError::MalformedResponse("companyfacts document has no 'facts' object".into())
        })?;

    let mut facts = Vec::new();
    for (taxonomy, concepts) in taxonomies {
        let Some(concepts) = concepts.as_object() else {
            debug!(taxonomy = %taxonomy, "Skipping taxonomy that is not an object");
            continue;
        };
        for (tag, concept) in concepts {
            collect_concept(taxonomy, tag, concept, &mut facts);
        }
    }

    let facts = dedup_facts(facts);
    debug!("Normalized {} facts", facts.len());
    Ok(facts)
}

/// Normalize a `companyconcept` document (a single concept).
///
/// # Errors
/// Returns [`FilingsError::MalformedResponse`] if the body is not JSON or is
/// missing `taxonomy`, `tag` or `units`.
pub fn parse_company_concept(body: &[u8]) -> Result<Vec<ConceptFact>> {
    let doc = parse_document(body, "companyconcept")?;
    let field = |name: &str| {
        doc.get(name).and_then(Value::as_str).ok_or_else(|| {
            FilingsError::MalformedResponse(format!("companyconcept document has no '{name}'"))
        })
    };
    let taxonomy = field("taxonomy")?;
    let tag = field("tag")?;
    if !doc.get("units").is_some_and(Value::is_object) {
        return Err(FilingsError::MalformedResponse(
            "companyconcept document has no 'units' object".into(),
        ));
    }

    let mut facts = Vec::new();
    collect_concept(taxonomy, tag, &doc, &mut facts);
    Ok(dedup_facts(facts))
}

fn collect_concept(taxonomy: &str, tag: &str, concept: &Value, out: &mut Vec<ConceptFact>) {
    let block = match ConceptBlock::deserialize(concept) {
        Ok(block) => block,
        Err(e) => {
            debug!(taxonomy, tag, error = %e, "Skipping unreadable concept");
            return;
        }
    };
    let label = block
        .label
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| humanize_tag(tag));

    for (unit, values) in &block.units {
        for value in values {
            let fact = RawFact::deserialize(value)
                .ok()
                .and_then(|raw| raw.into_fact(taxonomy, tag, &label, unit));
            match fact {
                Some(fact) => out.push(fact),
                None => debug!(taxonomy, tag, unit = %unit, "Skipping malformed fact"),
            }
        }
    }
}

/// Report cadence of the form a fact was filed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Cadence {
    Annual,
    Quarterly,
    Other,
}

impl Cadence {
    fn of(form: &str) -> Self {
        if is_annual_form(form) {
            Self::Annual
        } else if is_quarterly_form(form) {
            Self::Quarterly
        } else {
            Self::Other
        }
    }
}

/// Collapse facts that differ only by the filing that reported them.
///
/// Facts sharing (taxonomy, tag, unit, start, end) and filed on forms of the
/// same cadence keep the one with the latest `filed_date`; on equal dates the
/// later one in input order wins. The surviving fact takes the position of the
/// first occurrence.
///
/// A 10-Q repeats the prior year-end balance as a comparative, so the 10-K and
/// 10-Q copies of one period are both kept and left to period selection.
pub fn dedup_facts(facts: Vec<ConceptFact>) -> Vec<ConceptFact> {
    type Key = (String, String, String, Option<NaiveDate>, NaiveDate, Cadence);

    let mut positions: HashMap<Key, usize> = HashMap::new();
    let mut kept: Vec<ConceptFact> = Vec::with_capacity(facts.len());

    for fact in facts {
        let key = (
            fact.taxonomy.clone(),
            fact.tag.clone(),
            fact.unit.clone(),
            fact.period_start,
            fact.period_end,
            Cadence::of(&fact.form),
        );
        match positions.get(&key) {
            Some(&idx) => {
                if fact.filed_date >= kept[idx].filed_date {
                    kept[idx] = fact;
                }
            }
            None => {
                positions.insert(key, kept.len());
                kept.push(fact);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts_doc(assets: &str) -> String {
        format!(
            r#"{{"cik": 320193, "entityName": "Apple Inc.", "facts": {{
                "us-gaap": {{"Assets": {{"label": "Assets", "units": {{"USD": [{assets}]}}}}}}
            }}}}"#
        )
    }

    #[test]
    fn test_parses_instant_and_duration() {
        let body = r#"{"facts": {"us-gaap": {
            "Assets": {"label": "Assets", "units": {"USD": [
                {"end": "2023-09-30", "val": 100, "fy": 2023, "fp": "FY", "form": "10-K", "filed": "2023-11-03"}
            ]}},
            "Revenues": {"label": "Revenues", "units": {"USD": [
                {"start": "2022-10-01", "end": "2023-09-30", "val": 383285000000, "accn": "x", "fy": 2023, "fp": "FY", "form": "10-K", "filed": "2023-11-03"}
            ]}}
        }}}"#;

        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts.len(), 2);

        let assets = facts.iter().find(|f| f.tag == "Assets").unwrap();
        assert!(assets.is_instant());
        assert_eq!(assets.value, 100.0);

        let revenue = facts.iter().find(|f| f.tag == "Revenues").unwrap();
        assert_eq!(revenue.duration_days(), Some(364));
        assert_eq!(revenue.accession.as_deref(), Some("x"));
    }

    #[test]
    fn test_later_filing_wins() {
        let body = facts_doc(
            r#"{"end": "2022-09-24", "val": 1, "form": "10-K", "filed": "2022-10-28"},
               {"end": "2022-09-24", "val": 2, "form": "10-K", "filed": "2023-11-03"}"#,
        );
        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].value, 2.0);
        assert_eq!(facts[0].filed_date, NaiveDate::from_ymd_opt(2023, 11, 3).unwrap());
    }

    #[test]
    fn test_earlier_filing_listed_last_still_loses() {
        let body = facts_doc(
            r#"{"end": "2022-09-24", "val": 2, "form": "10-K/A", "filed": "2023-11-03"},
               {"end": "2022-09-24", "val": 1, "form": "10-K", "filed": "2022-10-28"}"#,
        );
        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].value, 2.0);
    }

    #[test]
    fn test_quarterly_comparative_keeps_annual_copy() {
        let body = facts_doc(
            r#"{"end": "2024-09-28", "val": 365, "fp": "FY", "form": "10-K", "filed": "2024-11-01"},
               {"end": "2024-09-28", "val": 365, "fp": "Q1", "form": "10-Q", "filed": "2025-01-31"},
               {"end": "2024-09-28", "val": 366, "fp": "FY", "form": "10-K/A", "filed": "2025-03-01"}"#,
        );
        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts.len(), 2);

        let annual = facts.iter().find(|f| f.form.starts_with("10-K")).unwrap();
        assert_eq!(annual.form, "10-K/A");
        assert_eq!(annual.value, 366.0);
        assert!(facts.iter().any(|f| f.form == "10-Q"));
    }

    #[test]
    fn test_equal_filing_dates_keep_later_entry() {
        let body = facts_doc(
            r#"{"end": "2023-09-30", "val": 1, "form": "10-K", "filed": "2023-11-03"},
               {"end": "2023-09-30", "val": 3, "form": "10-K", "filed": "2023-11-03"}"#,
        );
        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts[0].value, 3.0);
    }

    #[test]
    fn test_units_are_kept_separate() {
        let body = r#"{"facts": {"us-gaap": {"Revenues": {"label": "Revenues", "units": {
            "USD": [{"start": "2023-01-01", "end": "2023-12-31", "val": 10, "form": "10-K", "filed": "2024-02-01"}],
            "EUR": [{"start": "2023-01-01", "end": "2023-12-31", "val": 9, "form": "10-K", "filed": "2024-02-01"}]
        }}}}}"#;
        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts.len(), 2);
        assert!(facts.iter().any(|f| f.unit == "EUR" && f.value == 9.0));
    }

    #[test]
    fn test_malformed_facts_are_skipped() {
        let body = facts_doc(
            r#"{"end": "2023-09-30", "val": "n/a", "form": "10-K", "filed": "2023-11-03"},
               {"val": 5, "form": "10-K", "filed": "2023-11-03"},
               {"end": "30/09/2023", "val": 5, "form": "10-K", "filed": "2023-11-03"},
               {"end": "2023-09-30", "val": 7, "form": "10-K"},
               {"end": "2023-09-30", "val": 8, "form": "10-K", "filed": "2023-11-03"}"#,
        );
        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].value, 8.0);
    }

    #[test]
    fn test_missing_label_falls_back_to_tag() {
        let body = r#"{"facts": {"us-gaap": {"AccountsPayableCurrent": {"units": {"USD": [
            {"end": "2023-09-30", "val": 1, "form": "10-K", "filed": "2023-11-03"}
        ]}}}}}"#;
        let facts = parse_company_facts(body.as_bytes()).unwrap();
        assert_eq!(facts[0].label, "Accounts Payable Current");
    }

    #[test]
    fn test_missing_facts_object_is_malformed() {
        assert!(matches!(
            parse_company_facts(br#"{"cik": 1, "entityName": "Empty"}"#),
            Err(FilingsError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_company_facts(b"<html>"),
            Err(FilingsError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_empty_facts_object_is_fine() {
        assert!(parse_company_facts(br#"{"facts": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_company_concept() {
        let body = r#"{"cik": 320193, "taxonomy": "us-gaap", "tag": "AccountsPayableCurrent",
            "label": "Accounts Payable, Current", "entityName": "Apple Inc.",
            "units": {"USD": [
                {"end": "2023-09-30", "val": 62611000000, "fy": 2023, "fp": "FY", "form": "10-K", "filed": "2023-11-03"},
                {"end": "2023-09-30", "val": 62611000000, "fy": 2024, "fp": "FY", "form": "10-K", "filed": "2024-11-01"}
            ]}}"#;
        let facts = parse_company_concept(body.as_bytes()).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].label, "Accounts Payable, Current");
        assert_eq!(facts[0].fiscal_year, Some(2024));
    }

    #[test]
    fn test_company_concept_without_units() {
        let body = br#"{"taxonomy": "us-gaap", "tag": "Assets"}"#;
        assert!(matches!(
            parse_company_concept(body),
            Err(FilingsError::MalformedResponse(_))
        ));
    }
}
