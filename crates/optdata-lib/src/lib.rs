//! Thin client for collecting Deribit options-market data.
//!
//! This is a facade crate that re-exports functionality from the optdata
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use optdata_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::with_defaults()?;
//!     let currency = Currency::new("BTC");
//!
//!     let table = collect_data(&client, &currency, DEFAULT_POOL_SIZE).await?;
//!     let path = save_table(
//!         &table,
//!         std::path::Path::new("."),
//!         &currency,
//!         chrono::Local::now().naive_local(),
//!         OutputFormat::Csv,
//!     )?;
//!     println!("{} rows written to {}", table.len(), path.display());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/optdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use optdata_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use optdata_fetch::{
    ApiClient, ClientConfig, CollectProgress, DEFAULT_POOL_SIZE, FetchError, JsonSource, collect,
    collect_data, collect_data_with, collect_keyed, hist_vol, keyed_stream, options_list,
    order_book_stat, order_book_targets, order_book_urls,
    url::{BASE_URL, Endpoint, Request},
};

// Re-export assembly
#[cfg(feature = "assemble")]
pub use optdata_assemble::{KeyedAssembler, assemble, assemble_keyed, merge_record};

// Re-export formatters
#[cfg(feature = "format")]
pub use optdata_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, cell_text,
    hist_vol_file_name, options_file_name, save_table, save_volatility, write_table,
    write_volatility,
};

/// Prelude module for convenient imports.
///
/// ```
/// use optdata_lib::prelude::*;
/// ```
pub mod prelude {
    pub use optdata_types::{
        AssemblyError, Currency, Instrument, OptdataError, OptionType, OptionsTable,
        OrderBookStat, Result, VolatilityPoint, VolatilitySeries,
    };

    #[cfg(feature = "fetch")]
    pub use optdata_fetch::{
        ApiClient, ClientConfig, CollectProgress, DEFAULT_POOL_SIZE, JsonSource, collect_data,
        collect_data_with, hist_vol, options_list, order_book_urls,
    };

    #[cfg(feature = "assemble")]
    pub use optdata_assemble::{KeyedAssembler, assemble, assemble_keyed};

    #[cfg(feature = "format")]
    pub use optdata_format::{
        CsvFormatter, Formatter, JsonFormatter, OutputFormat, save_table, save_volatility,
    };
}
