//! JSON output format.

use optdata_types::{OptionsTable, VolatilitySeries};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn write_items<T: Serialize, W: Write>(
        &self,
        items: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, items)?;
                } else {
                    serde_json::to_writer(&mut writer, items)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for item in items {
                    serde_json::to_writer(&mut writer, item)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &OptionsTable,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_items(table.rows(), writer)
    }

    fn write_volatility<W: Write + Send>(
        &self,
        series: &VolatilitySeries,
        writer: W,
    ) -> Result<(), FormatError> {
        let column = series.column_name();
        let rows: Vec<Map<String, Value>> = series
            .points()
            .iter()
            .map(|point| {
                let mut row = Map::new();
                row.insert("date".to_string(), Value::from(point.timestamp.to_rfc3339()));
                row.insert(column.clone(), Value::from(point.value));
                row
            })
            .collect();
        self.write_items(&rows, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
