//! Folio CLI - Resolve document image references to device-scaled raster
//! images.
//!
//! A standalone driver for the Folio image-resource subsystem: feed it the
//! image references a document carries and it reports the decoded,
//! device-scaled dimensions the layout engine would see.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a local image at 2x device resolution
//! folio resolve photo.png --dpp 2.0
//!
//! # Resolve several references against a base document URI
//! folio resolve images/a.png images/b.jpg --base file:///srv/doc/index.html
//!
//! # Inline embedded data works too
//! folio resolve "data:image/png;base64,iVBOR..." --json
//!
//! # View configuration
//! folio config show
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Folio - image-resource resolution for document rendering.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve image references and report their device-scaled dimensions
    Resolve(cli::resolve::ResolveArgs),

    /// View configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    // An unreadable config falls back to defaults; resolution itself is
    // never fatal, so neither is configuration.
    let config = match &cli.config {
        Some(path) => match folio_core::Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {e}", path.display());
                folio_core::Config::default()
            }
        },
        None => folio_core::Config::default(),
    };

    tracing::debug!("Folio v{}", folio_core::VERSION);

    match cli.command {
        Commands::Resolve(args) => cli::resolve::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args, &config),
    }
}
