//! High-level EDGAR provider: company resolution and statement retrieval.

use filings_core::{
    Cik, Company, ConceptFact, FilingMetadata, FilingsError, ResponseCache, Result,
    StatementRecord, StatementRequest,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::{
    client::EdgarClient,
    concepts::lookup,
    config::EdgarConfig,
    normalize::dedup_facts,
    resolver::{CompanyResolver, Resolution},
    statements::build_statements,
};

/// SEC EDGAR data provider.
///
/// Wraps an [`EdgarClient`] and lazily builds the company directory from the
/// ticker table the first time a name or ticker is resolved.
#[derive(Debug)]
pub struct EdgarProvider {
    client: EdgarClient,
    resolver: OnceCell<CompanyResolver>,
}

impl EdgarProvider {
    /// Create a provider backed by `reqwest` and the given cache.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: EdgarConfig, cache: Arc<dyn ResponseCache>) -> Result<Self> {
        Ok(Self::with_client(EdgarClient::new(config, cache)?))
    }

    /// Create a provider around an existing client.
    pub fn with_client(client: EdgarClient) -> Self {
        Self {
            client,
            resolver: OnceCell::new(),
        }
    }

    /// The company directory, loading the ticker table on first use.
    pub async fn resolver(&self) -> Result<&CompanyResolver> {
        self.resolver
            .get_or_try_init(|| async {
                let resolver = CompanyResolver::new(self.client.company_tickers().await?);
                if resolver.is_empty() {
                    warn!("Ticker table is empty, only CIK lookups will work");
                }
                info!("Indexed {} companies", resolver.len());
                Ok(resolver)
            })
            .await
    }

    /// Resolve a company name or ticker.
    pub async fn resolve(&self, query: &str) -> Result<Resolution> {
        self.resolver().await?.resolve(query)
    }

    /// Look a company up by CIK.
    ///
    /// Companies missing from the ticker table (e.g. delisted filers) are
    /// described from their submissions document instead.
    #[instrument(skip(self), fields(cik = %cik))]
    pub async fn company_by_cik(&self, cik: Cik) -> Result<Company> {
        if let Some(company) = self.resolver().await?.find_by_cik(cik) {
            return Ok(company.clone());
        }

        debug!("CIK not in ticker table, reading submissions");
        let submissions = match self.client.submissions(cik).await {
            Ok(submissions) => submissions,
            Err(FilingsError::ResourceNotFound(_)) => {
                return Err(FilingsError::NotFound(format!("CIK {cik}")));
            }
            Err(e) => return Err(e),
        };
        Ok(submissions
            .tickers
            .iter()
            .fold(Company::new(cik, submissions.name.clone()), |company, ticker| {
                company.with_ticker(ticker)
            }))
    }

    /// Recent filings, newest first.
    ///
    /// # Arguments
    /// * `cik` - Company CIK
    /// * `form` - Only this form type (e.g., "10-K"); `None` for every form
    /// * `limit` - Maximum number of filings
    pub async fn filings(
        &self,
        cik: Cik,
        form: Option<&str>,
        limit: usize,
    ) -> Result<Vec<FilingMetadata>> {
        self.client.filings(cik, form, limit).await
    }

    /// Fetch every reported fact and assemble the requested statements.
    ///
    /// # Errors
    /// Returns [`FilingsError::InvalidParameter`] if the request is out of
    /// range, or any fetch error.
    #[instrument(skip(self), fields(cik = %cik, statement = %request.statement_type, period = %request.period_type))]
    pub async fn statements(
        &self,
        cik: Cik,
        request: &StatementRequest,
    ) -> Result<Vec<StatementRecord>> {
        request.validate()?;
        let facts = self.client.company_facts(cik).await?;
        let records = build_statements(
            &facts,
            request.statement_type,
            request.period_type,
            request.num_periods,
        );
        debug!("Built {} statement records", records.len());
        Ok(records)
    }

    /// Fetch only the listed concepts and assemble the requested statements.
    ///
    /// Concepts are fetched concurrently; every request still passes through
    /// the shared rate limiter. Concepts the company never reported contribute
    /// nothing. Tags outside the known concept table cannot be placed on a
    /// statement and are skipped with a warning.
    #[instrument(skip(self, concepts), fields(cik = %cik, concepts = concepts.len()))]
    pub async fn concept_statements(
        &self,
        cik: Cik,
        concepts: &[(String, String)],
        request: &StatementRequest,
    ) -> Result<Vec<StatementRecord>> {
        request.validate()?;

        let known: Vec<&(String, String)> = concepts
            .iter()
            .filter(|(taxonomy, tag)| {
                let found = lookup(taxonomy, tag).is_some();
                if !found {
                    warn!("{taxonomy}:{tag} is not a known statement concept, skipping");
                }
                found
            })
            .collect();

        let concurrency = self.client.rate_limiter().max_requests().max(1);
        let batches: Vec<Vec<ConceptFact>> = stream::iter(known)
            .map(|(taxonomy, tag)| self.concept_or_empty(cik, taxonomy, tag))
            .buffer_unordered(concurrency)
            .try_collect()
            .await?;

        let facts = dedup_facts(batches.into_iter().flatten().collect());
        Ok(build_statements(
            &facts,
            request.statement_type,
            request.period_type,
            request.num_periods,
        ))
    }

    async fn concept_or_empty(
        &self,
        cik: Cik,
        taxonomy: &str,
        tag: &str,
    ) -> Result<Vec<ConceptFact>> {
        match self.client.company_concept(cik, taxonomy, tag).await {
            Err(FilingsError::ResourceNotFound(_)) => {
                debug!(taxonomy, tag, "Concept not reported");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}
