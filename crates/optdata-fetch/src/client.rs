//! HTTP client for the exchange's public JSON API.

use async_trait::async_trait;
use optdata_types::OptdataError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::collect::DEFAULT_POOL_SIZE;
use crate::url::{BASE_URL, Request};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are resolved against.
    pub base_url: String,
    /// Idle connections kept per host; match it to the collection pool size.
    pub concurrency: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Ignore system proxy settings.
    pub no_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            concurrency: DEFAULT_POOL_SIZE,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("optdata/{}", env!("CARGO_PKG_VERSION")),
            no_proxy: false,
        }
    }
}

/// Errors that can occur during a single fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (connect, timeout, or body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Server returned a non-success status.
    #[error("Server error: {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Upstream error message, or the raw body.
        message: String,
    },

    /// The envelope carried an error object instead of a result.
    #[error("API error {code}: {message}")]
    Api {
        /// Exchange error code.
        code: i64,
        /// Exchange error message.
        message: String,
    },

    /// The envelope had neither `result` nor `error`.
    #[error("Response has no result field")]
    MissingResult,

    /// The body was not valid JSON or had an unexpected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The result parsed but its contents are unusable.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl FetchError {
    /// Returns true for network and timeout failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl From<FetchError> for OptdataError {
    fn from(e: FetchError) -> Self {
        if e.is_transport() {
            Self::Transport(e.to_string())
        } else {
            Self::Response(e.to_string())
        }
    }
}

/// A source of `result` payloads for requests.
///
/// [`ApiClient`] is the network implementation; the collector only depends
/// on this trait.
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Performs one request and returns its `result` payload.
    async fn fetch(&self, request: &Request) -> Result<Value, FetchError>;
}

/// Response envelope shared by every public endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// HTTP client with connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            // Keep one idle connection per possible in-flight request
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true);
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Issues one GET and returns the `result` payload.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, malformed
    /// JSON, or a missing `result` field. Nothing is retried.
    pub async fn get(&self, request: &Request) -> Result<Value, FetchError> {
        let url = request
            .url(&self.config.base_url)
            .map_err(FetchError::InvalidUrl)?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        extract_result(&body)
    }
}

#[async_trait]
impl JsonSource for ApiClient {
    async fn fetch(&self, request: &Request) -> Result<Value, FetchError> {
        self.get(request).await
    }
}

/// Unwraps the `result` field of a response body.
fn extract_result(body: &[u8]) -> Result<Value, FetchError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    match (envelope.result, envelope.error) {
        (Some(result), _) => Ok(result),
        (None, Some(error)) => Err(FetchError::Api {
            code: error.code,
            message: error.message,
        }),
        (None, None) => Err(FetchError::MissingResult),
    }
}

/// Best-effort message for a failed response: the envelope's error message
/// if there is one, otherwise the body text.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Envelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map_or_else(
            || String::from_utf8_lossy(body).trim().to_string(),
            |error| error.message,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockServer;
    use optdata_types::Currency;
    use serde_json::json;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.concurrency, 20);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("optdata/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = ApiClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_extract_result_object_and_array() {
        let object = extract_result(br#"{"jsonrpc":"2.0","result":{"mark_iv":77.7}}"#).unwrap();
        assert_eq!(object, json!({"mark_iv": 77.7}));

        let array = extract_result(br#"{"result":[[1589414400000,95.2]]}"#).unwrap();
        assert!(array.is_array());
    }

    #[test]
    fn test_extract_result_missing() {
        let result = extract_result(br#"{"jsonrpc":"2.0","id":1}"#);
        assert!(matches!(result, Err(FetchError::MissingResult)));
    }

    #[test]
    fn test_extract_result_api_error() {
        let body = br#"{"error":{"code":10004,"message":"instrument_not_found"}}"#;
        let result = extract_result(body);
        assert!(matches!(
            result,
            Err(FetchError::Api { code: 10004, ref message }) if message == "instrument_not_found"
        ));
    }

    #[test]
    fn test_extract_result_malformed() {
        let result = extract_result(b"<html>bad gateway</html>");
        assert!(matches!(result, Err(FetchError::Json(_))));
    }

    #[test]
    fn test_error_mapping() {
        let response: OptdataError = FetchError::MissingResult.into();
        assert!(matches!(response, OptdataError::Response(_)));
    }

    #[tokio::test]
    async fn test_get_unwraps_result() {
        let server = MockServer::start()
            .route(
                "/get_historical_volatility?currency=btc",
                200,
                json!({"result": [[1589414400000i64, 95.2]]}),
            )
            .spawn()
            .await;
        let client = server.client();

        let value = client
            .get(&Request::historical_volatility(&Currency::new("BTC")))
            .await
            .unwrap();
        assert_eq!(value, json!([[1589414400000i64, 95.2]]));
    }

    #[tokio::test]
    async fn test_get_non_success_status() {
        let server = MockServer::start()
            .route(
                "/get_instruments?currency=xyz&kind=option",
                400,
                json!({"error": {"code": 11050, "message": "bad_request"}}),
            )
            .spawn()
            .await;
        let client = server.client();

        let result = client
            .get(&Request::option_instruments(&Currency::new("XYZ")))
            .await;
        match result {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad_request");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_transport_failure() {
        let config = ClientConfig {
            base_url: MockServer::unreachable_base_url().await,
            timeout: Duration::from_secs(2),
            no_proxy: true,
            ..Default::default()
        };
        let client = ApiClient::new(config).unwrap();

        let error = client.get(&Request::order_book("BTC-1")).await.unwrap_err();
        assert!(error.is_transport());
        assert!(matches!(OptdataError::from(error), OptdataError::Transport(_)));
    }
}
