//! Output formatters for the optdata options-market data client.
//!
//! This crate provides formatters for writing options tables and
//! historical volatility series to various output formats:
//!
//! - [`CsvFormatter`] - Delimited text (CSV, TSV)
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`save_table`] / [`save_volatility`] - File output with standard names

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/optdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod file;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use file::{
    hist_vol_file_name, options_file_name, save_table, save_volatility, write_table,
    write_volatility,
};
pub use formatter::{FormatError, Formatter, OutputFormat, cell_text};
pub use json::{JsonFormatter, JsonStyle};
