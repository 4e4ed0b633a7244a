use filings_cache::{NoopCache, SqliteCache};
use filings_core::{
    Cik, FilingsError, OutputFormat, PeriodType, ResponseCache, Result, StatementRequest,
    StatementType,
};
use filings_edgar::EdgarConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cli::Cli;

const CACHE_FILE: &str = "responses.db";

/// Everything a run needs, after defaults are applied.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) company: Option<String>,
    pub(crate) cik: Option<Cik>,
    pub(crate) statement_type: StatementType,
    pub(crate) period_type: PeriodType,
    pub(crate) num_periods: Option<usize>,
    pub(crate) output_format: OutputFormat,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) concepts: Vec<(String, String)>,
    pub(crate) list_filings: bool,
    pub(crate) user_agent: String,
    pub(crate) cache_dir: Option<PathBuf>,
    pub(crate) cache_ttl: Duration,
    pub(crate) no_cache: bool,
    pub(crate) clear_cache: bool,
    pub(crate) rate_limit: u32,
    pub(crate) verbose: bool,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            company: cli.company.filter(|c| !c.trim().is_empty()),
            cik: cli.cik,
            statement_type: cli.statement_type,
            period_type: cli.period_type,
            num_periods: cli.num_periods,
            output_format: cli.output_format,
            output_file: cli.output_file,
            concepts: cli.concepts,
            list_filings: cli.list_filings,
            user_agent: cli.user_agent,
            cache_dir: cli.cache_dir,
            cache_ttl: Duration::from_secs(cli.cache_ttl),
            no_cache: cli.no_cache,
            clear_cache: cli.clear_cache,
            rate_limit: cli.rate_limit,
            verbose: cli.verbose,
        }
    }
}

impl Settings {
    /// Returns true when neither `--company` nor `--cik` was given.
    pub(crate) const fn is_interactive(&self) -> bool {
        self.company.is_none() && self.cik.is_none()
    }

    /// Requested statements, with the period type's default period count.
    pub(crate) fn request(&self) -> StatementRequest {
        let request = StatementRequest::new(self.statement_type, self.period_type);
        match self.num_periods {
            Some(n) => request.with_num_periods(n),
            None => request,
        }
    }

    /// Check flag combinations that the parser cannot.
    pub(crate) fn validate(&self) -> Result<()> {
        self.request().validate()?;
        if self.rate_limit == 0 {
            return Err(FilingsError::InvalidParameter(
                "--rate-limit must be at least 1".to_string(),
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(FilingsError::InvalidParameter(
                "--cache-ttl must be at least 1 second".to_string(),
            ));
        }
        if self.output_format == OutputFormat::Console && self.output_file.is_some() {
            return Err(FilingsError::InvalidParameter(
                "--output-file cannot be used with console output".to_string(),
            ));
        }
        self.edgar_config().validate()
    }

    pub(crate) fn edgar_config(&self) -> EdgarConfig {
        EdgarConfig::new(self.user_agent.clone())
            .with_requests_per_second(self.rate_limit)
            .with_cache_ttl(self.cache_ttl)
    }

    /// `--cache-dir`, else `<platform cache dir>/filings`.
    pub(crate) fn cache_path(&self) -> Option<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("filings")))
            .map(|dir| dir.join(CACHE_FILE))
    }

    /// Open the response cache, falling back to no caching when the cache
    /// directory is unusable.
    pub(crate) fn open_cache(&self) -> Arc<dyn ResponseCache> {
        if self.no_cache {
            debug!("Caching disabled");
            return Arc::new(NoopCache::new());
        }
        let Some(path) = self.cache_path() else {
            warn!("No cache directory available, caching disabled");
            return Arc::new(NoopCache::new());
        };

        let opened = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .map_err(FilingsError::from)
            .and_then(|()| SqliteCache::new(&path));
        match opened {
            Ok(cache) => {
                debug!(path = %path.display(), "Opened response cache");
                Arc::new(cache)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot open cache, caching disabled");
                Arc::new(NoopCache::new())
            }
        }
    }
}

/// Empty the response cache. A failure is logged and the run carries on.
pub(crate) async fn clear_cache(cache: &dyn ResponseCache) -> bool {
    match cache.clear().await {
        Ok(()) => {
            info!("Cache cleared");
            true
        }
        Err(e) => {
            warn!(error = %e, "Could not clear cache");
            false
        }
    }
}
