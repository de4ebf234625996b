//! Shelf-Value main entry point
//!
//! This is the command-line interface for the Shelf-Value catalogue valuer.

use anyhow::Context;
use clap::Parser;
use shelf_value::config::{load_config_or_default, validate};
use shelf_value::logging;
use shelf_value::valuation::{print_valuation, value_catalogue};
use std::path::PathBuf;

/// Shelf-Value: a catalogue inventory valuer
///
/// Shelf-Value walks every listing page of an online book catalogue, visits
/// each book's detail page and prints the total value of the stock on hand
/// (unit price × copies available, summed over every book).
#[derive(Parser, Debug)]
#[command(name = "shelf-value")]
#[command(version)]
#[command(about = "Values the in-stock inventory of a book catalogue", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used without one)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// First listing page of the catalogue (overrides the configuration)
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(start_url) = cli.start_url {
        config.catalogue.start_url = start_url;
        validate(&config).context("invalid --start-url")?;
    }

    // Scoped to the whole run; dropped when main returns
    let dispatch = logging::build(
        &config.logging,
        logging::console_filter(&config.logging.console_level, cli.verbose, cli.quiet),
    )
    .context("failed to set up logging")?;
    let _guard = tracing::dispatcher::set_default(&dispatch);

    tracing::info!("Valuing catalogue starting at {}", config.catalogue.start_url);

    let valuation = value_catalogue(&config).await?;
    print_valuation(&config.catalogue.start_url, &valuation);

    Ok(())
}
