//! Bounded parallel fan-out of requests.

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::info;

use crate::url::Request;
use crate::{FetchError, JsonSource};

/// Default number of requests in flight at once.
pub const DEFAULT_POOL_SIZE: usize = 20;

/// Fetches every request with at most `pool_size` in flight.
///
/// Results come back in completion order, not request order. The first
/// failure is returned and every request still in flight is dropped, so no
/// partial list is ever produced. A `pool_size` of zero is treated as one.
///
/// # Errors
///
/// Returns the first [`FetchError`] any request produced.
pub async fn collect<S>(
    source: &S,
    targets: Vec<Request>,
    pool_size: usize,
) -> Result<Vec<Value>, FetchError>
where
    S: JsonSource + ?Sized,
{
    let total = targets.len();
    let results: Vec<Value> = stream::iter(targets)
        .map(move |request| async move { source.fetch(&request).await })
        .buffer_unordered(pool_size.max(1))
        .try_collect()
        .await?;
    info!(total, pool_size, "collected responses");
    Ok(results)
}

/// Fetches keyed requests, tagging each result with its key.
///
/// Like [`collect`], results arrive in completion order; the key lets the
/// caller put them back in request order.
///
/// # Errors
///
/// Returns the first [`FetchError`] any request produced.
pub async fn collect_keyed<K, S>(
    source: &S,
    targets: Vec<(K, Request)>,
    pool_size: usize,
) -> Result<Vec<(K, Value)>, FetchError>
where
    S: JsonSource + ?Sized,
{
    let total = targets.len();
    let results: Vec<(K, Value)> = keyed_stream(source, targets, pool_size)
        .try_collect()
        .await?;
    info!(total, pool_size, "collected keyed responses");
    Ok(results)
}

/// Creates a stream of keyed results with at most `pool_size` requests in flight.
///
/// Dropping the stream cancels whatever is still in flight.
pub fn keyed_stream<'a, K, S>(
    source: &'a S,
    targets: Vec<(K, Request)>,
    pool_size: usize,
) -> impl Stream<Item = Result<(K, Value), FetchError>> + 'a
where
    K: 'a,
    S: JsonSource + ?Sized,
{
    stream::iter(targets)
        .map(move |(key, request)| async move {
            source.fetch(&request).await.map(|value| (key, value))
        })
        .buffer_unordered(pool_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::Rng;
    use serde_json::json;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers order book requests with the instrument name after a random
    /// delay, failing for names listed in `failing`.
    #[derive(Debug, Default)]
    struct MockSource {
        failing: Vec<String>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn failing(name: &str) -> Self {
            Self {
                failing: vec![name.to_string()],
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl JsonSource for MockSource {
        async fn fetch(&self, request: &Request) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let delay = rand::thread_rng().gen_range(1..15);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let name = request.query()[0].1.clone();
            if self.failing.contains(&name) {
                return Err(FetchError::Api {
                    code: 10004,
                    message: format!("{name} not found"),
                });
            }
            Ok(json!({ "instrument_name": name }))
        }
    }

    fn targets(n: usize) -> Vec<Request> {
        (0..n).map(|i| Request::order_book(&format!("BTC-{i}"))).collect()
    }

    #[tokio::test]
    async fn test_collect_returns_every_result() {
        let source = MockSource::default();
        let results = collect(&source, targets(50), 8).await.unwrap();

        assert_eq!(results.len(), 50);
        let names: BTreeSet<_> = results
            .iter()
            .map(|v| v["instrument_name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names.len(), 50);
    }

    #[tokio::test]
    async fn test_collect_respects_pool_size() {
        let source = MockSource::default();
        collect(&source, targets(40), 4).await.unwrap();

        let peak = source.peak.load(Ordering::SeqCst);
        assert!(peak <= 4, "peak concurrency {peak} exceeded pool size");
        assert!(peak >= 1);
    }

    #[tokio::test]
    async fn test_collect_zero_pool_size() {
        let source = MockSource::default();
        let results = collect(&source, targets(3), 0).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(source.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_collect_fails_on_single_error() {
        let source = MockSource::failing("BTC-7");
        let result = collect(&source, targets(20), 5).await;

        assert!(matches!(result, Err(FetchError::Api { code: 10004, .. })));
    }

    #[tokio::test]
    async fn test_collect_empty() {
        let source = MockSource::default();
        let results = collect(&source, Vec::new(), DEFAULT_POOL_SIZE).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_collect_keyed_tags_results() {
        let source = MockSource::default();
        let keyed: Vec<_> = (0..30)
            .map(|i| (i, Request::order_book(&format!("BTC-{i}"))))
            .collect();
        let results = collect_keyed(&source, keyed, 6).await.unwrap();

        assert_eq!(results.len(), 30);
        for (key, value) in &results {
            assert_eq!(value["instrument_name"], format!("BTC-{key}"));
        }
    }

    #[tokio::test]
    async fn test_keyed_stream_reports_failure() {
        let source = MockSource::failing("BTC-2");
        let keyed: Vec<_> = (0..5)
            .map(|i| (i, Request::order_book(&format!("BTC-{i}"))))
            .collect();

        let outcomes: Vec<_> = keyed_stream(&source, keyed, 2).collect().await;
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[tokio::test]
    async fn test_collect_repeatable_as_set() {
        let source = MockSource::default();
        let first: BTreeSet<_> = collect(&source, targets(25), 10)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        let second: BTreeSet<_> = collect(&source, targets(25), 10)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(first, second);
    }
}
