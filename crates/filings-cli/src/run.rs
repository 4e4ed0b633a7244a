use chrono::Local;
use filings_core::{Company, FilingsError, PeriodType, Result, StatementRecord};
use filings_edgar::{EdgarProvider, Resolution};
use filings_export::{ExportContext, default_file_name, export, export_to_path};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use crate::interactive::Prompter;
use crate::settings::Settings;

/// Resolve, fetch, build and export, reading prompts from `input` when no
/// company was given on the command line.
pub(crate) async fn run<R: BufRead, W: Write>(
    mut settings: Settings,
    provider: &EdgarProvider,
    input: R,
    output: W,
) -> Result<()> {
    let interactive = settings.is_interactive();
    let mut prompter = Prompter::new(input, output);
    if interactive {
        prompter.banner("EDGAR Financial Tool - Interactive Mode")?;
    }

    let Some(company) = select_company(&settings, provider, &mut prompter, interactive).await?
    else {
        prompter.say("\nOperation cancelled.")?;
        return Ok(());
    };

    if interactive {
        prompter.say(&format!("\nSelected: {company}"))?;
        settings.statement_type = prompter.statement_type()?;
        settings.period_type = prompter.period_type()?;
        settings.num_periods = Some(prompter.num_periods(settings.period_type)?);
        settings.output_format = prompter.output_format()?;
        if settings.output_format.is_file() {
            let default = default_output_path(&company, &settings)?;
            settings.output_file = Some(prompter.output_file(&default.to_string_lossy())?);
        }
    }

    let request = settings.request();
    request.validate()?;
    print_summary(&mut prompter, &company, &settings)?;

    if settings.list_filings {
        list_filings(&mut prompter, provider, &company, &settings).await?;
    }

    let records = if settings.concepts.is_empty() {
        provider.statements(company.cik, &request).await?
    } else {
        provider
            .concept_statements(company.cik, &settings.concepts, &request)
            .await?
    };
    if records.is_empty() {
        return Err(FilingsError::NotFound(format!(
            "no {} data found for {} ({} periods)",
            settings.statement_type.title(),
            company.name,
            settings.period_type
        )));
    }
    info!(records = records.len(), "Built statements");

    write_output(&mut prompter, company, &settings, &records)
}

async fn select_company<R: BufRead, W: Write>(
    settings: &Settings,
    provider: &EdgarProvider,
    prompter: &mut Prompter<R, W>,
    interactive: bool,
) -> Result<Option<Company>> {
    if let Some(cik) = settings.cik {
        return provider.company_by_cik(cik).await.map(Some);
    }
    let query = match &settings.company {
        Some(query) => query.clone(),
        None => prompter.company_query()?,
    };

    match provider.resolve(&query).await {
        Ok(Resolution::Unique(company)) => Ok(Some(company)),
        Ok(Resolution::Candidates(candidates)) if interactive && candidates.len() > 1 => {
            let companies: Vec<Company> = candidates.into_iter().map(|c| c.company).collect();
            prompter.pick_company(&query, &companies)
        }
        Ok(Resolution::Candidates(candidates)) => {
            let best = candidates
                .into_iter()
                .next()
                .ok_or_else(|| FilingsError::NotFound(query.clone()))?;
            info!(query = %query, score = best.score, "Using closest match {}", best.company);
            Ok(Some(best.company))
        }
        Err(FilingsError::AmbiguousMatch { candidates, .. }) if interactive => {
            prompter.pick_company(&query, &candidates)
        }
        Err(e) => Err(e),
    }
}

fn print_summary<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    company: &Company,
    settings: &Settings,
) -> Result<()> {
    let rule = "=".repeat(60);
    prompter.say(&format!("\n{rule}\n  EDGAR Financial Tool - Request Summary\n{rule}"))?;
    prompter.say(&format!("Company: {company}"))?;
    prompter.say(&format!("Statement Type: {}", settings.statement_type.title()))?;
    prompter.say(&format!("Period Type: {}", settings.period_type))?;
    prompter.say(&format!("Number of Periods: {}", settings.request().num_periods))?;
    prompter.say(&format!("Output Format: {}", settings.output_format))?;
    if !settings.concepts.is_empty() {
        let concepts: Vec<String> = settings
            .concepts
            .iter()
            .map(|(taxonomy, tag)| format!("{taxonomy}:{tag}"))
            .collect();
        prompter.say(&format!("Concepts: {}", concepts.join(", ")))?;
    }
    prompter.say(&format!("{rule}\n"))
}

async fn list_filings<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    provider: &EdgarProvider,
    company: &Company,
    settings: &Settings,
) -> Result<()> {
    let form = match settings.period_type {
        PeriodType::Annual => "10-K",
        PeriodType::Quarterly | PeriodType::Ytd => "10-Q",
    };
    let filings = provider
        .filings(company.cik, Some(form), settings.request().num_periods)
        .await?;

    prompter.say(&format!("Found {} {form} filings.", filings.len()))?;
    for filing in &filings {
        prompter.say(&format!(
            "  {}  {}  {}  {}",
            filing.filing_date,
            filing.form,
            filing.accession_number,
            filing.primary_document_url(company.cik)
        ))?;
    }
    prompter.say("")
}

fn default_output_path(company: &Company, settings: &Settings) -> Result<PathBuf> {
    let cik = company.cik.to_string();
    let name = default_file_name(
        company.primary_ticker().unwrap_or(&cik),
        settings.statement_type,
        settings.period_type,
        Local::now().date_naive(),
        settings.output_format,
    )?;
    Ok(PathBuf::from(name))
}

fn write_output<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    company: Company,
    settings: &Settings,
    records: &[StatementRecord],
) -> Result<()> {
    let path = match (&settings.output_file, settings.output_format.is_file()) {
        (_, false) => None,
        (Some(path), true) => Some(path.clone()),
        (None, true) => Some(default_output_path(&company, settings)?),
    };
    let ctx = ExportContext::new(company, settings.statement_type, settings.period_type);

    match path {
        Some(path) => {
            export_to_path(&ctx, records, settings.output_format, &path)?;
            prompter.say(&format!("\nOutput saved to: {}", path.display()))
        }
        None => {
            let rendered = export(&ctx, records, settings.output_format)?;
            prompter.output().write_all(&rendered)?;
            prompter.say("")
        }
    }
}
