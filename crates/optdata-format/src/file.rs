//! File output with the standard file names.

use chrono::NaiveDateTime;
use optdata_types::{Currency, OptionsTable, VolatilitySeries};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

/// Timestamp layout embedded in options table file names.
const STAMP_FORMAT: &str = "%Y_%b_%d-%H_%M_%S";

/// Returns the file name of an options table collected at `now`.
///
/// ```
/// use chrono::NaiveDate;
/// use optdata_format::options_file_name;
/// use optdata_types::Currency;
///
/// let now = NaiveDate::from_ymd_opt(2020, 5, 14)
///     .unwrap()
///     .and_hms_opt(9, 5, 3)
///     .unwrap();
/// assert_eq!(
///     options_file_name(&Currency::new(Currency::BTC), now, "csv"),
///     "btc_options_data-2020_May_14-09_05_03.csv"
/// );
/// ```
#[must_use]
pub fn options_file_name(currency: &Currency, now: NaiveDateTime, extension: &str) -> String {
    format!(
        "{currency}_options_data-{}.{extension}",
        now.format(STAMP_FORMAT)
    )
}

/// Returns the file name of a historical volatility series.
#[must_use]
pub fn hist_vol_file_name(currency: &Currency, extension: &str) -> String {
    format!("{currency}_hist_vol.{extension}")
}

/// Writes an options table to `path` in the given format.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_table(
    table: &OptionsTable,
    path: &Path,
    format: OutputFormat,
) -> Result<(), FormatError> {
    let writer = BufWriter::new(File::create(path)?);

    match format {
        OutputFormat::Csv => CsvFormatter::new().write_table(table, writer),
        OutputFormat::Tsv => CsvFormatter::tsv().write_table(table, writer),
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_table(table, writer),
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_table(table, writer),
    }
}

/// Writes a historical volatility series to `path` in the given format.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_volatility(
    series: &VolatilitySeries,
    path: &Path,
    format: OutputFormat,
) -> Result<(), FormatError> {
    let writer = BufWriter::new(File::create(path)?);

    match format {
        OutputFormat::Csv => CsvFormatter::new().write_volatility(series, writer),
        OutputFormat::Tsv => CsvFormatter::tsv().write_volatility(series, writer),
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_volatility(series, writer),
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_volatility(series, writer),
    }
}

/// Saves an options table under `dir` with a timestamped file name.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_table(
    table: &OptionsTable,
    dir: &Path,
    currency: &Currency,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<PathBuf, FormatError> {
    let path = dir.join(options_file_name(currency, now, format.extension()));
    write_table(table, &path, format)?;
    info!(path = %path.display(), rows = table.len(), "saved options table");
    Ok(path)
}

/// Saves a historical volatility series under `dir`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_volatility(
    series: &VolatilitySeries,
    dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf, FormatError> {
    let path = dir.join(hist_vol_file_name(series.currency(), format.extension()));
    write_volatility(series, &path, format)?;
    info!(path = %path.display(), points = series.len(), "saved historical volatility");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use optdata_types::{Instrument, OptionType, VolatilityPoint};
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 5, 14)
            .unwrap()
            .and_hms_opt(16, 42, 7)
            .unwrap()
    }

    fn create_test_table() -> OptionsTable {
        let instrument =
            Instrument::new("BTC-22MAY20-9250-P", OptionType::Put, 9250.0, 1_590_134_400_000);
        let mut record = instrument.to_record();
        record.insert("mark_iv".to_string(), json!(77.72));
        OptionsTable::from_records([record])
    }

    #[test]
    fn test_file_names() {
        let eth = Currency::new("ETH");
        assert_eq!(
            options_file_name(&eth, now(), "csv"),
            "eth_options_data-2020_May_14-16_42_07.csv"
        );
        assert_eq!(hist_vol_file_name(&eth, "json"), "eth_hist_vol.json");
    }

    #[test]
    fn test_save_table_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_table(
            &create_test_table(),
            dir.path(),
            &Currency::new("BTC"),
            now(),
            OutputFormat::Csv,
        )
        .unwrap();

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("btc_options_data-2020_May_14-16_42_07.csv")
        );
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("expiration_timestamp,option_type,instrument_name,strike,mark_iv")
        );
        assert_eq!(
            lines.next(),
            Some("1590134400000,put,BTC-22MAY20-9250-P,9250.0,77.72")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_save_table_ndjson() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_table(
            &create_test_table(),
            dir.path(),
            &Currency::new("BTC"),
            now(),
            OutputFormat::Ndjson,
        )
        .unwrap();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("ndjson"));
        let content = std::fs::read_to_string(&path).unwrap();
        let row: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(row["instrument_name"], "BTC-22MAY20-9250-P");
    }

    #[test]
    fn test_save_volatility() {
        let dir = tempfile::tempdir().unwrap();
        let series = VolatilitySeries::new(
            Currency::new("BTC"),
            vec![
                VolatilityPoint::from_millis(1_589_414_400_000, 95.5).unwrap(),
                VolatilityPoint::from_millis(1_589_410_800_000, 95.25).unwrap(),
            ],
        );

        let path = save_volatility(&series, dir.path(), OutputFormat::Csv).unwrap();

        assert!(path.ends_with("btc_hist_vol.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "date,btc_hist_vol\n2020-05-13 23:00:00,95.25\n2020-05-14 00:00:00,95.5\n"
        );
    }

    #[test]
    fn test_save_table_tsv_and_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let currency = Currency::new("BTC");

        let tsv = save_table(&create_test_table(), dir.path(), &currency, now(), OutputFormat::Tsv)
            .unwrap();
        let content = std::fs::read_to_string(&tsv).unwrap();
        assert!(content.starts_with("expiration_timestamp\toption_type\t"));

        let json =
            save_table(&create_test_table(), dir.path(), &currency, now(), OutputFormat::Json)
                .unwrap();
        let content = std::fs::read_to_string(&json).unwrap();
        assert!(content.starts_with("[\n  {"));
        let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(rows[0]["mark_iv"], 77.72);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let result = write_table(&create_test_table(), &path, OutputFormat::Csv);
        assert!(matches!(result, Err(FormatError::Io(_))));
    }
}
