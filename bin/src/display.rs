//! Display utilities and output formatting for the optdata CLI.

use clap::ValueEnum;
use optdata_lib::prelude::*;

/// Output format for saved data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Tsv => Self::Tsv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", OutputFormat::from(*self))
    }
}

/// Print instruments as an aligned table.
pub(crate) fn print_instruments(instruments: &[Instrument]) {
    println!(
        "{:<24} {:<6} {:>12} {:<20}",
        "INSTRUMENT", "TYPE", "STRIKE", "EXPIRATION"
    );
    println!("{}", "-".repeat(65));

    for instrument in instruments {
        let expiration = instrument.expiration().map_or_else(
            || instrument.expiration_timestamp().to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
        );
        println!(
            "{:<24} {:<6} {:>12} {:<20}",
            instrument.name(),
            instrument.option_type().as_str(),
            instrument.strike(),
            expiration
        );
    }
}

/// Print the last points of a volatility series.
pub(crate) fn print_volatility(series: &VolatilitySeries, rows: usize) {
    println!("{:<20} {:>14}", "DATE", series.column_name());
    println!("{}", "-".repeat(35));

    for point in series.tail(rows) {
        println!(
            "{:<20} {:>14.6}",
            point.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            point.value
        );
    }
}
