//! Historical volatility series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Currency;

/// One annualised historical volatility observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    /// Observation time (UTC, hourly).
    pub timestamp: DateTime<Utc>,
    /// Annualised volatility in percent.
    pub value: f64,
}

impl VolatilityPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Creates a point from an exchange `[epoch_ms, value]` pair.
    ///
    /// Returns `None` if the timestamp is out of range.
    #[must_use]
    pub fn from_millis(millis: i64, value: f64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|timestamp| Self::new(timestamp, value))
    }
}

/// Historical volatility for one currency, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilitySeries {
    currency: Currency,
    points: Vec<VolatilityPoint>,
}

impl VolatilitySeries {
    /// Creates a series, sorting points by timestamp.
    #[must_use]
    pub fn new(currency: Currency, mut points: Vec<VolatilityPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { currency, points }
    }

    /// Returns the currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[VolatilityPoint] {
        &self.points
    }

    /// Returns the value column label, e.g. `btc_hist_vol`.
    #[must_use]
    pub fn column_name(&self) -> String {
        format!("{}_hist_vol", self.currency)
    }

    /// Returns the last `n` points.
    #[must_use]
    pub fn tail(&self, n: usize) -> &[VolatilityPoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }

    /// Returns the number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
