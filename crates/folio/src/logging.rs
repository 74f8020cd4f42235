//! Logging initialization for the CLI.
//!
//! All log output goes to stderr; stdout is reserved for resolution
//! results. `RUST_LOG` overrides the level chosen by the flags.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the `tracing` subscriber.
///
/// `verbose` raises the default level from INFO to DEBUG; `json_format`
/// switches to structured JSON lines for machine consumption.
pub fn init(verbose: bool, json_format: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
