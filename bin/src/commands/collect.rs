//! Collect command implementation.
//!
//! This module handles collecting the full options table for a currency
//! and writing it to a timestamped file.

use crate::commands::client;
use crate::display::Format;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use optdata_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Collect instruments and order books into one table and save it.
pub(crate) async fn collect(
    currency: &Currency,
    base_url: &str,
    workers: usize,
    output_dir: &Path,
    format: Format,
    save: bool,
    quiet: bool,
) -> Result<()> {
    let client = client(base_url, workers)?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} order books ({percent}%) {msg}")
                .context("Invalid progress template")?
                .progress_chars("=>-"),
        );
        pb.set_message(currency.to_string());
        pb
    };

    let table = collect_data_with(&client, currency, workers, |p| {
        progress.set_length(p.total as u64);
        progress.set_position(p.completed as u64);
    })
    .await;
    let table = match table {
        Ok(table) => table,
        Err(e) => {
            progress.abandon_with_message("failed");
            return Err(e).with_context(|| format!("Failed to collect {currency} options data"));
        }
    };
    progress.finish_with_message(format!(
        "Collected {} rows x {} columns",
        table.len(),
        table.columns().len()
    ));
    info!(%currency, rows = table.len(), columns = table.columns().len(), "collected options table");

    if save {
        let now = chrono::Local::now().naive_local();
        let path = save_table(&table, output_dir, currency, now, format.into())?;
        if !quiet {
            println!("Output written to: {}", path.display());
        }
    }

    Ok(())
}
