//! Error types for optdata.

use thiserror::Error;

/// Result type alias for optdata operations.
pub type Result<T> = std::result::Result<T, OptdataError>;

/// Errors that can occur while fetching, assembling, or saving options data.
#[derive(Error, Debug)]
pub enum OptdataError {
    /// Network or timeout failure talking to the exchange.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success status, malformed body, or missing `result` field.
    #[error("Response error: {0}")]
    Response(String),

    /// Instruments and order book stats could not be paired.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shape mismatch between the instrument list and the order book stats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// Positional pairing needs one stat per instrument.
    #[error("Cannot pair {instruments} instruments with {stats} order book stats")]
    LengthMismatch {
        /// Number of instruments.
        instruments: usize,
        /// Number of order book stats.
        stats: usize,
    },

    /// No order book stat arrived for an instrument.
    #[error("Missing order book stats for {0}")]
    MissingStats(String),

    /// An order book stat is keyed by a name absent from the instrument list.
    #[error("Order book stats for unknown instrument {0}")]
    UnknownInstrument(String),

    /// The same instrument received two order book stats.
    #[error("Duplicate order book stats for {0}")]
    DuplicateStats(String),
}
