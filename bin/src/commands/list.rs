//! List command implementation.
//!
//! This module handles listing the option instruments of a currency.

use crate::commands::client;
use crate::display::print_instruments;
use anyhow::Result;
use optdata_lib::prelude::*;

/// List the option instruments currently listed for a currency.
pub(crate) async fn list_options(currency: &Currency, base_url: &str) -> Result<()> {
    let client = client(base_url, 1)?;
    let instruments = options_list(&client, currency).await?;

    if instruments.is_empty() {
        println!("No instruments found.");
        return Ok(());
    }

    print_instruments(&instruments);

    let calls = instruments.iter().filter(|i| i.is_call()).count();
    println!(
        "\nTotal: {} instruments ({} calls, {} puts)",
        instruments.len(),
        calls,
        instruments.len() - calls
    );
    Ok(())
}
