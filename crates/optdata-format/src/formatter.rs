//! Output format abstraction.

use optdata_types::{OptdataError, OptionsTable, VolatilitySeries};
use serde_json::Value;
use std::borrow::Cow;
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited text writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<FormatError> for OptdataError {
    fn from(e: FormatError) -> Self {
        match e {
            FormatError::Io(e) => Self::Io(e),
            FormatError::Json(e) => Self::Json(e),
            other => Self::Format(other.to_string()),
        }
    }
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes an options table to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write + Send>(
        &self,
        table: &OptionsTable,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes a historical volatility series to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_volatility<W: Write + Send>(
        &self,
        series: &VolatilitySeries,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

/// Renders a JSON value as a flat text cell.
///
/// Strings are written bare, null is empty, and nested arrays or objects
/// (bid/ask ladders, greeks) are written as compact JSON.
#[must_use]
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
