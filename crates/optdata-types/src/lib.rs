//! Core types for the optdata options-market data client.
//!
//! This crate provides the fundamental data structures used throughout optdata:
//!
//! - [`Currency`] - Currency code used to scope every request
//! - [`Instrument`] - A single option contract from the instrument list
//! - [`OrderBookStat`] - Free-form order book statistics for one instrument
//! - [`OptionsTable`] - The combined instrument and order book table
//! - [`VolatilitySeries`] - Hourly historical volatility for a currency

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/optdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod currency;
mod error;
mod instrument;
mod table;
mod volatility;

pub use currency::Currency;
pub use error::{AssemblyError, OptdataError, Result};
pub use instrument::{Instrument, OptionType, OptionTypeParseError};
pub use table::{CombinedRecord, OptionsTable, OrderBookStat};
pub use volatility::{VolatilityPoint, VolatilitySeries};
