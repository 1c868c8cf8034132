//! High-level options data operations.

use futures::StreamExt;
use optdata_assemble::KeyedAssembler;
use optdata_types::{
    Currency, Instrument, OptionsTable, OrderBookStat, VolatilityPoint, VolatilitySeries,
};
use serde_json::Value;
use tracing::info;

use crate::url::Request;
use crate::{FetchError, JsonSource, keyed_stream};

/// Progress of an order book collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectProgress {
    /// Order books received so far.
    pub completed: usize,
    /// Order books requested.
    pub total: usize,
}

/// Fetches the hourly historical volatility of a currency.
///
/// # Errors
///
/// Returns an error if the request fails or the result is not a list of
/// `[epoch_ms, value]` pairs.
pub async fn hist_vol<S>(
    source: &S,
    currency: &Currency,
) -> Result<VolatilitySeries, FetchError>
where
    S: JsonSource + ?Sized,
{
    let value = source
        .fetch(&Request::historical_volatility(currency))
        .await?;
    let pairs: Vec<(i64, f64)> = serde_json::from_value(value)?;
    let points = pairs
        .into_iter()
        .map(|(millis, vol)| {
            VolatilityPoint::from_millis(millis, vol).ok_or_else(|| {
                FetchError::InvalidPayload(format!("timestamp {millis} out of range"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(%currency, points = points.len(), "fetched historical volatility");
    Ok(VolatilitySeries::new(currency.clone(), points))
}

/// Fetches the option instruments listed for a currency.
///
/// # Errors
///
/// Returns an error if the request fails or an entry lacks one of the
/// instrument columns.
pub async fn options_list<S>(
    source: &S,
    currency: &Currency,
) -> Result<Vec<Instrument>, FetchError>
where
    S: JsonSource + ?Sized,
{
    let value = source.fetch(&Request::option_instruments(currency)).await?;
    let instruments: Vec<Instrument> = serde_json::from_value(value)?;
    info!(%currency, instruments = instruments.len(), "fetched option instruments");
    Ok(instruments)
}

/// Builds one order book request per instrument, keyed by instrument name.
#[must_use]
pub fn order_book_targets(instruments: &[Instrument]) -> Vec<(String, Request)> {
    instruments
        .iter()
        .map(|instrument| {
            (
                instrument.name().to_string(),
                Request::order_book(instrument.name()),
            )
        })
        .collect()
}

/// Renders the order book URL of every instrument.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `base_url` does not parse.
pub fn order_book_urls(
    instruments: &[Instrument],
    base_url: &str,
) -> Result<Vec<String>, FetchError> {
    instruments
        .iter()
        .map(|instrument| {
            Request::order_book(instrument.name())
                .url(base_url)
                .map(String::from)
                .map_err(FetchError::InvalidUrl)
        })
        .collect()
}

/// Converts an order book result into stats for the named instrument.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPayload`] if the result is not a JSON object.
pub fn order_book_stat(
    instrument_name: &str,
    value: Value,
) -> Result<OrderBookStat, FetchError> {
    match value {
        Value::Object(stat) => Ok(stat),
        other => Err(FetchError::InvalidPayload(format!(
            "order book for {instrument_name} is not an object: {other}"
        ))),
    }
}

/// Collects the full options table for a currency.
///
/// Fetches the instrument list, fetches every order book with at most
/// `pool_size` requests in flight, and assembles one row per instrument in
/// instrument-list order. Any failed request fails the whole call.
///
/// # Errors
///
/// Returns a transport, response, or assembly error.
pub async fn collect_data<S>(
    source: &S,
    currency: &Currency,
    pool_size: usize,
) -> optdata_types::Result<OptionsTable>
where
    S: JsonSource + ?Sized,
{
    collect_data_with(source, currency, pool_size, |_| {}).await
}

/// Like [`collect_data`], reporting progress after each order book arrives.
///
/// # Errors
///
/// Returns a transport, response, or assembly error.
pub async fn collect_data_with<S, F>(
    source: &S,
    currency: &Currency,
    pool_size: usize,
    mut on_progress: F,
) -> optdata_types::Result<OptionsTable>
where
    S: JsonSource + ?Sized,
    F: FnMut(CollectProgress),
{
    let instruments = options_list(source, currency).await?;
    let targets = order_book_targets(&instruments);
    let mut assembler = KeyedAssembler::new(instruments);
    let total = assembler.expected();

    info!(%currency, total, pool_size, "collecting order books");
    let mut stream = std::pin::pin!(keyed_stream(source, targets, pool_size));
    while let Some(item) = stream.next().await {
        let (name, value) = item?;
        let stat = order_book_stat(&name, value)?;
        assembler.insert(name, stat)?;
        on_progress(CollectProgress {
            completed: assembler.received(),
            total,
        });
    }

    Ok(assembler.finish()?)
}
