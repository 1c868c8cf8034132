//! HTTP client and parallel collection for the optdata options-market data client.
//!
//! This crate provides the data download pipeline:
//!
//! - [`url::Request`] - Request descriptors for the public endpoints
//! - [`ApiClient`] - HTTP client that unwraps the `result` envelope
//! - [`collect`] / [`collect_keyed`] - Bounded parallel fan-out and fan-in
//! - [`collect_data`] - Instrument list, order books, and assembly in one call

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/optdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod client;
mod collect;
pub mod url;

#[cfg(test)]
mod testing;

pub use api::{
    CollectProgress, collect_data, collect_data_with, hist_vol, options_list, order_book_stat,
    order_book_targets, order_book_urls,
};
pub use client::{ApiClient, ClientConfig, FetchError, JsonSource};
pub use collect::{DEFAULT_POOL_SIZE, collect, collect_keyed, keyed_stream};
