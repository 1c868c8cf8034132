//! optdata CLI - Deribit options-market data collector.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use optdata_lib::{BASE_URL, Currency, DEFAULT_POOL_SIZE};
use std::path::PathBuf;

mod commands;
mod display;
mod telemetry;

use display::Format;

#[derive(Parser)]
#[command(name = "optdata")]
#[command(about = "Deribit options-market data collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the public API
    #[arg(long, global = true, default_value = BASE_URL)]
    base_url: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch hourly historical volatility
    HistVol {
        /// Currency code (e.g., btc, eth)
        #[arg(short, long, default_value = Currency::BTC)]
        currency: Currency,

        /// Number of most recent points to print
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,

        /// Save the full series to <currency>_hist_vol.<format>
        #[arg(short, long)]
        save: bool,

        /// Output directory
        #[arg(short, long = "output", default_value = ".")]
        output_dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// List option instruments
    List {
        /// Currency code (e.g., btc, eth)
        #[arg(short, long, default_value = Currency::BTC)]
        currency: Currency,
    },

    /// Print the order book URL of every option instrument
    Urls {
        /// Currency code (e.g., btc, eth)
        #[arg(short, long, default_value = Currency::BTC)]
        currency: Currency,
    },

    /// Collect instruments and order books into one table
    Collect {
        /// Currency code (e.g., btc, eth)
        #[arg(short, long, default_value = Currency::BTC)]
        currency: Currency,

        /// Maximum concurrent order book requests
        #[arg(short, long, default_value_t = DEFAULT_POOL_SIZE)]
        workers: usize,

        /// Output directory. Files named <currency>_options_data-<timestamp>.<format>
        #[arg(short, long = "output", default_value = ".")]
        output_dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Collect without writing a file
        #[arg(long)]
        no_save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(telemetry::default_filter(cli.verbose, cli.quiet));

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::HistVol {
            currency,
            rows,
            save,
            output_dir,
            format,
        } => {
            commands::hist_vol::hist_vol(
                &currency,
                &cli.base_url,
                rows,
                save,
                &output_dir,
                format,
                cli.quiet,
            )
            .await
        }
        Commands::List { currency } => {
            commands::list::list_options(&currency, &cli.base_url).await
        }
        Commands::Urls { currency } => commands::urls::option_urls(&currency, &cli.base_url).await,
        Commands::Collect {
            currency,
            workers,
            output_dir,
            format,
            no_save,
        } => {
            commands::collect::collect(
                &currency,
                &cli.base_url,
                workers,
                &output_dir,
                format,
                !no_save,
                cli.quiet,
            )
            .await
        }
    }
}
