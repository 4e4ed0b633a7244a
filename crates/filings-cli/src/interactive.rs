//! Prompts for interactive mode.

use filings_core::{Company, FilingsError, OutputFormat, PeriodType, Result, StatementType};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const STATEMENT_CHOICES: [StatementType; 6] = [
    StatementType::BalanceSheet,
    StatementType::IncomeStatement,
    StatementType::CashFlow,
    StatementType::Equity,
    StatementType::ComprehensiveIncome,
    StatementType::All,
];

/// Reads answers from `input` and writes questions to `output`.
#[derive(Debug)]
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The underlying writer.
    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print a line.
    pub(crate) fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Ask a question; an empty answer or end of input yields `None`.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    /// Ask for a 1-based menu choice; anything unparsable falls back to `default`.
    fn choose(&mut self, question: &str, len: usize, default: usize) -> Result<usize> {
        let answer = self.ask(question)?;
        Ok(answer
            .and_then(|a| a.parse::<usize>().ok())
            .filter(|n| (1..=len).contains(n))
            .unwrap_or(default))
    }

    pub(crate) fn banner(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(60);
        self.say(&format!("\n{rule}\n  {title}\n{rule}\n"))
    }

    pub(crate) fn company_query(&mut self) -> Result<String> {
        self.ask("Enter company name or ticker symbol: ")?
            .ok_or_else(|| FilingsError::InvalidParameter("No company entered".to_string()))
    }

    /// Let the user pick one of several companies; `None` cancels.
    pub(crate) fn pick_company(
        &mut self,
        query: &str,
        companies: &[Company],
    ) -> Result<Option<Company>> {
        self.say(&format!("\nFound {} matches for '{query}':", companies.len()))?;
        for (idx, company) in companies.iter().enumerate() {
            self.say(&format!("{}. {company}", idx + 1))?;
        }
        let answer = self.ask("\nSelect the correct company (or 0 to cancel): ")?;
        match answer.as_deref().map(str::parse::<usize>) {
            None | Some(Ok(0)) => Ok(None),
            Some(Ok(n)) if n <= companies.len() => Ok(Some(companies[n - 1].clone())),
            _ => Err(FilingsError::InvalidParameter("Invalid selection".to_string())),
        }
    }

    pub(crate) fn statement_type(&mut self) -> Result<StatementType> {
        self.say("\nSelect financial statement type:")?;
        for (idx, choice) in STATEMENT_CHOICES.iter().enumerate() {
            self.say(&format!("{}. {} ({})", idx + 1, choice.title(), choice.code()))?;
        }
        let n = STATEMENT_CHOICES.len();
        let choice = self.choose(&format!("\nEnter choice [1-{n}] (default: {n}): "), n, n)?;
        Ok(STATEMENT_CHOICES[choice - 1])
    }

    pub(crate) fn period_type(&mut self) -> Result<PeriodType> {
        self.say("\nSelect report type:")?;
        self.say("1. Annual Reports (10-K)")?;
        self.say("2. Quarterly Reports (10-Q)")?;
        self.say("3. Year-to-date (10-Q)")?;
        let choice = self.choose("\nEnter choice [1-3] (default: 1): ", 3, 1)?;
        Ok(PeriodType::ALL[choice - 1])
    }

    pub(crate) fn num_periods(&mut self, period_type: PeriodType) -> Result<usize> {
        let default = period_type.default_periods();
        let answer = self.ask(&format!(
            "\nNumber of periods to retrieve (default: {default}): "
        ))?;
        match answer {
            None => Ok(default),
            Some(a) => a.parse().map_err(|_| {
                FilingsError::InvalidParameter(format!("'{a}' is not a number of periods"))
            }),
        }
    }

    /// Numbered choice or a format name; unknown answers pick the default.
    pub(crate) fn output_format(&mut self) -> Result<OutputFormat> {
        self.say("\nSelect output format:")?;
        for (idx, format) in OutputFormat::ALL.iter().enumerate() {
            self.say(&format!("{}. {}", idx + 1, format.as_str()))?;
        }
        let n = OutputFormat::ALL.len();
        let answer = self.ask(&format!("\nEnter choice [1-{n}] (default: 1): "))?;
        Ok(answer
            .and_then(|a| match a.parse::<usize>() {
                Ok(idx) => OutputFormat::ALL.get(idx.wrapping_sub(1)).copied(),
                Err(_) => a.parse().ok(),
            })
            .unwrap_or_default())
    }

    pub(crate) fn output_file(&mut self, default: &str) -> Result<PathBuf> {
        let answer = self.ask(&format!("\nOutput file (default: {default}): "))?;
        Ok(PathBuf::from(answer.as_deref().unwrap_or(default)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filings_core::Cik;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_defaults_on_empty_answers() {
        let mut p = prompter("\n\n\n\n\n");
        assert_eq!(p.statement_type().unwrap(), StatementType::All);
        assert_eq!(p.period_type().unwrap(), PeriodType::Annual);
        assert_eq!(p.num_periods(PeriodType::Annual).unwrap(), 3);
        assert_eq!(p.output_format().unwrap(), OutputFormat::Csv);
        assert_eq!(
            p.output_file("aapl_all_annual_20241018.csv").unwrap(),
            PathBuf::from("aapl_all_annual_20241018.csv")
        );
    }

    #[test]
    fn test_numbered_choices() {
        let mut p = prompter("1\n2\n8\n3\n");
        assert_eq!(p.statement_type().unwrap(), StatementType::BalanceSheet);
        assert_eq!(p.period_type().unwrap(), PeriodType::Quarterly);
        assert_eq!(p.num_periods(PeriodType::Quarterly).unwrap(), 8);
        assert_eq!(p.output_format().unwrap(), OutputFormat::Excel);
    }

    #[test]
    fn test_format_by_name_and_fallback() {
        let mut p = prompter("json\n99\n");
        assert_eq!(p.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(p.output_format().unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn test_end_of_input_takes_defaults() {
        let mut p = prompter("");
        assert_eq!(p.statement_type().unwrap(), StatementType::All);
        assert!(p.company_query().is_err());
    }

    #[test]
    fn test_pick_company() {
        let companies = vec![
            Company::new(Cik::try_from(1_u32).unwrap(), "Acme Holdings Inc").with_ticker("ACMA"),
            Company::new(Cik::try_from(2_u32).unwrap(), "Acme Holdings, Inc.").with_ticker("ACMB"),
        ];

        let mut p = prompter("2\n");
        let picked = p.pick_company("acme", &companies).unwrap().unwrap();
        assert_eq!(picked.cik, Cik::try_from(2_u32).unwrap());

        let mut p = prompter("0\n");
        assert!(p.pick_company("acme", &companies).unwrap().is_none());

        let mut p = prompter("7\n");
        assert!(p.pick_company("acme", &companies).is_err());
    }

    #[test]
    fn test_prompts_are_written() {
        let mut p = prompter("\n");
        p.period_type().unwrap();
        let written = String::from_utf8(p.output).unwrap();
        assert!(written.contains("1. Annual Reports (10-K)"));
        assert!(written.contains("(default: 1)"));
    }
}
