//! Instrument and order book table assembly for optdata.
//!
//! This crate turns an instrument list plus per-instrument order book stats
//! into one [`OptionsTable`](optdata_types::OptionsTable):
//!
//! - [`merge_record`] - Column-wise union of one instrument and its stats
//! - [`assemble`] - Positional pairing of two equally ordered sequences
//! - [`assemble_keyed`] - Pairing by instrument name
//! - [`KeyedAssembler`] - Incremental keyed assembly as stats arrive

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/optdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assembler;
mod merge;

pub use assembler::{KeyedAssembler, assemble, assemble_keyed};
pub use merge::merge_record;
