//! Option instrument definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::CombinedRecord;

/// Option contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionType {
    /// Returns the option type as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = OptionTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            _ => Err(OptionTypeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid option type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTypeParseError(String);

impl std::fmt::Display for OptionTypeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid option type '{}', expected call or put", self.0)
    }
}

impl std::error::Error for OptionTypeParseError {}

/// A single option contract from the instrument list.
///
/// Only the four columns used downstream are kept; any other field the
/// exchange sends is ignored when deserializing. Field order here is the
/// column order of the instrument half of a [`CombinedRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Expiry as epoch milliseconds.
    expiration_timestamp: i64,
    /// Call or put.
    option_type: OptionType,
    /// Exchange identifier, e.g. `BTC-22MAY20-9250-P`.
    instrument_name: String,
    /// Strike price.
    strike: f64,
}

impl Instrument {
    /// Creates a new instrument.
    #[must_use]
    pub fn new(
        instrument_name: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        expiration_timestamp: i64,
    ) -> Self {
        Self {
            expiration_timestamp,
            option_type,
            instrument_name: instrument_name.into(),
            strike,
        }
    }

    /// Returns the exchange instrument name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.instrument_name
    }

    /// Returns the option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the strike price.
    #[must_use]
    pub const fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the expiry as epoch milliseconds.
    #[must_use]
    pub const fn expiration_timestamp(&self) -> i64 {
        self.expiration_timestamp
    }

    /// Returns the expiry as a UTC datetime, if it is in range.
    #[must_use]
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expiration_timestamp)
    }

    /// Returns true if the contract is a call.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.option_type, OptionType::Call)
    }

    /// Returns true if the contract is a put.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self.option_type, OptionType::Put)
    }

    /// Flattens the instrument into the leading columns of a record.
    #[must_use]
    pub fn to_record(&self) -> CombinedRecord {
        let mut record = CombinedRecord::new();
        record.insert(
            "expiration_timestamp".to_string(),
            Value::from(self.expiration_timestamp),
        );
        record.insert(
            "option_type".to_string(),
            Value::from(self.option_type.as_str()),
        );
        record.insert(
            "instrument_name".to_string(),
            Value::from(self.instrument_name.as_str()),
        );
        record.insert("strike".to_string(), Value::from(self.strike));
        record
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} @ {})", self.instrument_name, self.option_type, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_instrument_from_exchange_json() {
        let json = r#"{
            "tick_size": 0.0005,
            "strike": 9250.0,
            "settlement_period": "week",
            "quote_currency": "USD",
            "option_type": "put",
            "kind": "option",
            "is_active": true,
            "instrument_name": "BTC-22MAY20-9250-P",
            "expiration_timestamp": 1590134400000,
            "base_currency": "BTC"
        }"#;
        let instrument: Instrument = serde_json::from_str(json).unwrap();

        assert_eq!(instrument.name(), "BTC-22MAY20-9250-P");
        assert!(instrument.is_put());
        assert_relative_eq!(instrument.strike(), 9250.0);
        assert_eq!(instrument.expiration_timestamp(), 1_590_134_400_000);
    }

    #[test]
    fn test_unknown_option_type_rejected() {
        let json = r#"{"strike": 1.0, "option_type": "straddle",
            "instrument_name": "X", "expiration_timestamp": 0}"#;
        assert!(serde_json::from_str::<Instrument>(json).is_err());
    }

    #[test]
    fn test_expiration() {
        let instrument = Instrument::new("BTC-22MAY20-9250-P", OptionType::Put, 9250.0, 1_590_134_400_000);
        let expected = Utc.with_ymd_and_hms(2020, 5, 22, 8, 0, 0).unwrap();
        assert_eq!(instrument.expiration(), Some(expected));
        assert_eq!(instrument.expiration().unwrap().day(), 22);
    }

    #[test]
    fn test_to_record_column_order() {
        let instrument = Instrument::new("BTC-26JUN20-8000-C", OptionType::Call, 8000.0, 1_593_158_400_000);
        let record = instrument.to_record();
        let columns: Vec<_> = record.keys().map(String::as_str).collect();

        assert_eq!(
            columns,
            ["expiration_timestamp", "option_type", "instrument_name", "strike"]
        );
        assert_eq!(record["option_type"], "call");
    }

    #[test]
    fn test_option_type_parse() {
        assert_eq!("CALL".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("future".parse::<OptionType>().is_err());
    }
}
