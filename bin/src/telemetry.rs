//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Maps the `-v`/`-q` flags to a default filter directive.
pub(crate) const fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub(crate) fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
