//! CSV output format.

use csv::WriterBuilder;
use optdata_types::{OptionsTable, VolatilitySeries};
use std::io::Write;

use crate::{FormatError, Formatter, cell_text};

/// Timestamp format of the volatility series index column.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: u8,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }

    fn writer<W: Write>(&self, writer: W) -> csv::Writer<W> {
        WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(writer)
    }
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &OptionsTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let mut out = self.writer(writer);

        if !table.columns().is_empty() {
            out.write_record(table.columns())?;
        }

        for row in table.rows() {
            out.write_record(
                table
                    .columns()
                    .iter()
                    .map(|column| row.get(column).map(cell_text).unwrap_or_default().into_owned()),
            )?;
        }

        out.flush()?;
        Ok(())
    }

    fn write_volatility<W: Write + Send>(
        &self,
        series: &VolatilitySeries,
        writer: W,
    ) -> Result<(), FormatError> {
        let mut out = self.writer(writer);

        out.write_record(["date".to_string(), series.column_name()])?;

        for point in series.points() {
            out.write_record([
                point.timestamp.format(DATE_FORMAT).to_string(),
                point.value.to_string(),
            ])?;
        }

        out.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == b'\t' { "tsv" } else { "csv" }
    }
}
