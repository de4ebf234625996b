//! Diagnostics sink
//!
//! Two independent destinations are combined into one [`Dispatch`]:
//! - the console (stderr), at the configured level or as raised by `-v`
//! - a size-bounded rotating log file, warnings and above by default
//!
//! The dispatch is built explicitly and installed by the caller for the
//! duration of the run; nothing here touches global state.

mod rotating;

pub use rotating::RotatingFile;

use crate::config::LoggingConfig;
use crate::ValuationError;
use std::sync::Mutex;
use tracing::{Dispatch, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Builds the console filter from the configured level and CLI verbosity
///
/// # Arguments
///
/// * `level` - Configured console level for this crate
/// * `verbose` - Number of `-v` flags
/// * `quiet` - Only show errors
pub fn console_filter(level: &str, verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new(format!("shelf_value={},warn", level)),
        1 => EnvFilter::new("shelf_value=debug,info"),
        2 => EnvFilter::new("shelf_value=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Builds the diagnostics dispatch for one run
///
/// # Arguments
///
/// * `config` - Logging configuration (file path, rotation, file level)
/// * `console` - Filter for the console layer, see [`console_filter`]
///
/// # Returns
///
/// * `Ok(Dispatch)` - Ready to install with `tracing::dispatcher::set_default`
/// * `Err(ValuationError)` - The level is invalid or the log file cannot be opened
pub fn build(config: &LoggingConfig, console: EnvFilter) -> Result<Dispatch, ValuationError> {
    let file_level: Level = config.file_level.parse().map_err(|_| {
        ValuationError::Logging(format!("invalid file level '{}'", config.file_level))
    })?;

    let file = RotatingFile::open(&config.file, config.max_file_bytes, config.max_files)?;

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console),
        )
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(LevelFilter::from_level(file_level)),
        );

    Ok(Dispatch::new(subscriber))
}
