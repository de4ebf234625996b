//! Shelf-Value: a catalogue inventory valuer
//!
//! This crate walks a paginated online book catalogue, visits every book's
//! detail page and sums unit price × stock quantity across the whole
//! inventory. Listing pages are discovered lazily, one page at a time.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod logging;
pub mod valuation;

use thiserror::Error;

/// Main error type for Shelf-Value operations
#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// A single page fetch that did not produce a usable body
#[derive(Debug, Error)]
#[error("failed to fetch {url}: {failure}")]
pub struct FetchError {
    /// The URL that was requested
    pub url: String,

    /// What went wrong
    pub failure: FetchFailure,
}

/// Classified cause of a [`FetchError`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

/// Errors that end the catalogue walk early
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("listing page {url} unreachable after {attempts} attempts: {source}")]
    ListingUnreachable {
        url: String,
        attempts: u32,
        source: FetchError,
    },
}

/// Result type alias for Shelf-Value operations
pub type Result<T> = std::result::Result<T, ValuationError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CatalogueCrawler, RetryPolicy};
pub use extract::{BookDetails, InventoryValue, StockQuantity, UnitPrice};
pub use valuation::{value_catalogue, Valuation, Valuer};
