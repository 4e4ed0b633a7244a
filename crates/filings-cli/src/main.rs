//! `filings` binary.
//!
//! Retrieves financial statements for a company from SEC EDGAR and writes
//! them as CSV, JSON, Excel or a console table.

mod cli;
mod interactive;
mod run;
mod settings;

use clap::Parser;
use filings_core::Result;
use filings_edgar::EdgarProvider;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::settings::{Settings, clear_cache};

#[tokio::main]
async fn main() {
    let settings = Settings::from(Cli::parse());
    init_logging(settings.verbose);

    if let Err(e) = run_main(settings).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr so console exports on stdout stay clean.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run_main(settings: Settings) -> Result<()> {
    settings.validate()?;
    let cache = settings.open_cache();

    if settings.clear_cache {
        clear_cache(cache.as_ref()).await;
        if settings.is_interactive() {
            return Ok(());
        }
    }

    let provider = EdgarProvider::new(settings.edgar_config(), cache)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run::run(settings, &provider, stdin.lock(), stdout.lock()).await
}
