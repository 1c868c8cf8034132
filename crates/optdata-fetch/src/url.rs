//! Exchange endpoint and request construction.

use optdata_types::Currency;
use reqwest::Url;

/// Base URL of the exchange's public REST API.
pub const BASE_URL: &str = "https://www.deribit.com/api/v2/public/";

/// Public endpoints used by optdata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Hourly annualised historical volatility.
    HistoricalVolatility,
    /// Instrument list for a currency and kind.
    Instruments,
    /// Order book and pricing statistics for one instrument.
    OrderBook,
}

impl Endpoint {
    /// Returns the endpoint path relative to the base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::HistoricalVolatility => "get_historical_volatility",
            Self::Instruments => "get_instruments",
            Self::OrderBook => "get_order_book",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A fully described GET request: endpoint plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    endpoint: Endpoint,
    query: Vec<(&'static str, String)>,
}

impl Request {
    /// Historical volatility for a currency.
    #[must_use]
    pub fn historical_volatility(currency: &Currency) -> Self {
        Self {
            endpoint: Endpoint::HistoricalVolatility,
            query: vec![("currency", currency.to_string())],
        }
    }

    /// Option instruments for a currency.
    #[must_use]
    pub fn option_instruments(currency: &Currency) -> Self {
        Self {
            endpoint: Endpoint::Instruments,
            query: vec![("currency", currency.to_string()), ("kind", "option".to_string())],
        }
    }

    /// Order book for one instrument.
    #[must_use]
    pub fn order_book(instrument_name: &str) -> Self {
        Self {
            endpoint: Endpoint::OrderBook,
            query: vec![("instrument_name", instrument_name.to_string())],
        }
    }

    /// Returns the endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Returns the query parameters in send order.
    #[must_use]
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Resolves the request against a base URL.
    ///
    /// A missing trailing slash on `base` is tolerated.
    ///
    /// # Errors
    ///
    /// Returns the parse error message if `base` is not a valid URL.
    ///
    /// # Example
    ///
    /// ```
    /// use optdata_fetch::url::{BASE_URL, Request};
    ///
    /// let url = Request::order_book("BTC-22MAY20-9250-P").url(BASE_URL).unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://www.deribit.com/api/v2/public/get_order_book?instrument_name=BTC-22MAY20-9250-P"
    /// );
    /// ```
    pub fn url(&self, base: &str) -> Result<Url, String> {
        let base = if base.ends_with('/') {
            Url::parse(base)
        } else {
            Url::parse(&format!("{base}/"))
        }
        .map_err(|e| format!("invalid base URL {base}: {e}"))?;

        let mut url = base
            .join(self.endpoint.path())
            .map_err(|e| format!("invalid endpoint path: {e}"))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endpoint)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}
