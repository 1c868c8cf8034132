//! CLI command implementations.

pub(crate) mod collect;
pub(crate) mod hist_vol;
pub(crate) mod list;
pub(crate) mod urls;

use anyhow::{Context, Result};
use optdata_lib::prelude::*;

/// Build an API client against `base_url` sized for `workers` requests.
pub(crate) fn client(base_url: &str, workers: usize) -> Result<ApiClient> {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        concurrency: workers.max(1),
        ..Default::default()
    };
    ApiClient::new(config).context("Failed to build HTTP client")
}
