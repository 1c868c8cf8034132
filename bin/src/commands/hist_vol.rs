//! Historical volatility command implementation.

use crate::commands::client;
use crate::display::{Format, print_volatility};
use anyhow::Result;
use optdata_lib::prelude::*;
use std::path::Path;

/// Fetch the historical volatility of a currency, print the latest points,
/// and optionally save the full series.
pub(crate) async fn hist_vol(
    currency: &Currency,
    base_url: &str,
    rows: usize,
    save: bool,
    output_dir: &Path,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let client = client(base_url, 1)?;
    let series = optdata_lib::hist_vol(&client, currency).await?;

    if !quiet {
        print_volatility(&series, rows);
    }

    if save {
        let path = save_volatility(&series, output_dir, format.into())?;
        if !quiet {
            println!("\nOutput written to: {}", path.display());
        }
    }

    Ok(())
}
