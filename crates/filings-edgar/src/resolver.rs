//! Company name and ticker resolution.

use filings_core::{Cik, Company, FilingsError, Result};
use std::collections::HashMap;
use tracing::debug;

/// Minimum similarity for a fuzzy name match.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Maximum number of ranked candidates returned.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Scores closer than this are treated as a tie.
const SCORE_EPSILON: f64 = 1e-9;

/// A company with its match score.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    /// The matched company.
    pub company: Company,
    /// Similarity in `0.0..=1.0`; exact matches score 1.0.
    pub score: f64,
}

/// Outcome of resolving a query.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Exact ticker or exact name match.
    Unique(Company),
    /// Fuzzy matches ranked best first, with a strictly best first entry.
    Candidates(Vec<Candidate>),
}

impl Resolution {
    /// The exact match, or the best candidate.
    #[must_use]
    pub fn best(&self) -> Option<&Company> {
        match self {
            Self::Unique(company) => Some(company),
            Self::Candidates(candidates) => candidates.first().map(|c| &c.company),
        }
    }
}

/// Lowercase, drop punctuation and collapse whitespace.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase with `.` and `-` treated as the same separator (`BRK.B` is `BRK-B`).
#[must_use]
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase().replace('.', "-")
}

/// Substring score: 0.6 for containment plus up to 0.4 for length overlap.
fn containment_score(query: &str, name: &str) -> f64 {
    if query.is_empty() || name.is_empty() {
        return 0.0;
    }
    let (shorter, longer) = if query.len() <= name.len() {
        (query, name)
    } else {
        (name, query)
    };
    if longer.contains(shorter) {
        0.6 + 0.4 * (shorter.len() as f64 / longer.len() as f64)
    } else {
        0.0
    }
}

/// Similarity of a normalized query to a normalized company name.
#[must_use]
pub fn similarity(query: &str, name: &str) -> f64 {
    strsim::jaro_winkler(query, name).max(containment_score(query, name))
}

/// Resolves free-text company names and tickers against the SEC ticker table.
#[derive(Debug, Clone)]
pub struct CompanyResolver {
    companies: Vec<Company>,
    normalized_names: Vec<String>,
    by_ticker: HashMap<String, usize>,
    by_name: HashMap<String, Vec<usize>>,
    by_cik: HashMap<Cik, usize>,
    threshold: f64,
    max_candidates: usize,
}

impl CompanyResolver {
    /// Index a company directory.
    #[must_use]
    pub fn new(companies: Vec<Company>) -> Self {
        let mut by_ticker = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_cik = HashMap::new();
        let mut normalized_names = Vec::with_capacity(companies.len());

        for (idx, company) in companies.iter().enumerate() {
            for ticker in &company.tickers {
                by_ticker.entry(normalize_ticker(ticker)).or_insert(idx);
            }
            let name = normalize_name(&company.name);
            by_name.entry(name.clone()).or_default().push(idx);
            by_cik.entry(company.cik).or_insert(idx);
            normalized_names.push(name);
        }

        Self {
            companies,
            normalized_names,
            by_ticker,
            by_name,
            by_cik,
            threshold: DEFAULT_THRESHOLD,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// Set the minimum fuzzy similarity.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the maximum number of ranked candidates.
    #[must_use]
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    /// Number of companies in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Returns true if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Look a company up by CIK.
    #[must_use]
    pub fn find_by_cik(&self, cik: Cik) -> Option<&Company> {
        self.by_cik.get(&cik).map(|&idx| &self.companies[idx])
    }

    /// Resolve a name or ticker.
    ///
    /// Exact ticker matches win over everything, then exact normalized-name
    /// matches, then fuzzy name matches above the similarity threshold.
    ///
    /// # Errors
    /// - [`FilingsError::InvalidParameter`] for an empty query
    /// - [`FilingsError::NotFound`] when nothing clears the threshold
    /// - [`FilingsError::AmbiguousMatch`] when several companies share the top
    ///   score
    pub fn resolve(&self, query: &str) -> Result<Resolution> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FilingsError::InvalidParameter(
                "Company query must not be empty".to_string(),
            ));
        }

        if let Some(&idx) = self.by_ticker.get(&normalize_ticker(query)) {
            debug!(query, cik = %self.companies[idx].cik, "Exact ticker match");
            return Ok(Resolution::Unique(self.companies[idx].clone()));
        }

        let normalized = normalize_name(query);
        if let Some(indices) = self.by_name.get(&normalized) {
            return match indices.as_slice() {
                [idx] => {
                    debug!(query, cik = %self.companies[*idx].cik, "Exact name match");
                    Ok(Resolution::Unique(self.companies[*idx].clone()))
                }
                many => Err(FilingsError::AmbiguousMatch {
                    query: query.to_string(),
                    candidates: many.iter().map(|&i| self.companies[i].clone()).collect(),
                }),
            };
        }

        self.fuzzy(query, &normalized)
    }

    /// Resolve to a single company, taking the best fuzzy candidate.
    ///
    /// # Errors
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_unique(&self, query: &str) -> Result<Company> {
        match self.resolve(query)? {
            Resolution::Unique(company) => Ok(company),
            Resolution::Candidates(candidates) => candidates
                .into_iter()
                .next()
                .map(|c| c.company)
                .ok_or_else(|| FilingsError::NotFound(query.to_string())),
        }
    }

    fn fuzzy(&self, query: &str, normalized: &str) -> Result<Resolution> {
        let mut scored: Vec<(usize, f64)> = self
            .normalized_names
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx, similarity(normalized, name)))
            .filter(|&(_, score)| score >= self.threshold)
            .collect();

        if scored.is_empty() {
            return Err(FilingsError::NotFound(query.to_string()));
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let top = scored[0].1;
        let tied: Vec<usize> = scored
            .iter()
            .take_while(|&&(_, score)| top - score < SCORE_EPSILON)
            .map(|&(idx, _)| idx)
            .collect();

        if tied.len() > 1 {
            return Err(FilingsError::AmbiguousMatch {
                query: query.to_string(),
                candidates: tied.into_iter().map(|i| self.companies[i].clone()).collect(),
            });
        }

        scored.truncate(self.max_candidates);
        debug!(query, matches = scored.len(), top, "Fuzzy name match");
        Ok(Resolution::Candidates(
            scored
                .into_iter()
                .map(|(idx, score)| Candidate {
                    company: self.companies[idx].clone(),
                    score,
                })
                .collect(),
        ))
    }
}
