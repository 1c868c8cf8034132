//! Urls command implementation.

use crate::commands::client;
use anyhow::Result;
use optdata_lib::prelude::*;

/// Print the order book URL of every listed instrument, one per line.
pub(crate) async fn option_urls(currency: &Currency, base_url: &str) -> Result<()> {
    let client = client(base_url, 1)?;
    let instruments = options_list(&client, currency).await?;

    for url in order_book_urls(&instruments, client.base_url())? {
        println!("{url}");
    }
    Ok(())
}
