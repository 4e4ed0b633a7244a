//! Output format selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FilingsError, Result};

/// Output format for exported statements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values, one row per fact.
    #[default]
    Csv,
    /// Pretty-printed JSON document.
    Json,
    /// Excel workbook, one sheet per statement.
    Excel,
    /// Table printed to stdout.
    Console,
}

impl OutputFormat {
    /// All output formats.
    pub const ALL: [Self; 4] = [Self::Csv, Self::Json, Self::Excel, Self::Console];

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Excel => "excel",
            Self::Console => "console",
        }
    }

    /// File extension for file formats; `None` for console output.
    #[must_use]
    pub const fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Csv => Some("csv"),
            Self::Json => Some("json"),
            Self::Excel => Some("xlsx"),
            Self::Console => None,
        }
    }

    /// Returns true if this format writes to a file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.extension().is_some()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = FilingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "excel" | "xlsx" => Ok(Self::Excel),
            "console" => Ok(Self::Console),
            _ => Err(FilingsError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("csv", OutputFormat::Csv, Some("csv"))]
    #[case("JSON", OutputFormat::Json, Some("json"))]
    #[case("excel", OutputFormat::Excel, Some("xlsx"))]
    #[case("xlsx", OutputFormat::Excel, Some("xlsx"))]
    #[case("console", OutputFormat::Console, None)]
    fn test_parse_and_extension(
        #[case] input: &str,
        #[case] expected: OutputFormat,
        #[case] extension: Option<&str>,
    ) {
        let format: OutputFormat = input.parse().unwrap();
        assert_eq!(format, expected);
        assert_eq!(format.extension(), extension);
    }

    #[test]
    fn test_unsupported_format() {
        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, FilingsError::UnsupportedFormat(ref s) if s == "pdf"));
    }
}
