use serde::Deserialize;
use std::path::PathBuf;

/// Catalogue used when no start URL is configured
pub const DEFAULT_START_URL: &str = "https://books.toscrape.com/index.html";

/// Main configuration structure for Shelf-Value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalogue: CatalogueConfig,
    pub http: HttpConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

/// Which catalogue to value
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// First listing page of the catalogue
    #[serde(rename = "start-url")]
    pub start_url: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
        }
    }
}

/// HTTP session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("shelf-value/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Retry policy for listing-page fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per listing page, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Delay after the first failure (milliseconds), doubled per attempt
    #[serde(rename = "initial-backoff-ms")]
    pub initial_backoff_ms: u64,

    /// Upper bound on a single delay (milliseconds)
    #[serde(rename = "max-backoff-ms")]
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
        }
    }
}

/// Diagnostics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Path of the persistent log file
    pub file: PathBuf,

    /// Size at which the log file is rotated (bytes)
    #[serde(rename = "max-file-bytes")]
    pub max_file_bytes: u64,

    /// Number of rotated files kept next to the live one
    #[serde(rename = "max-files")]
    pub max_files: u32,

    /// Minimum level written to the console
    #[serde(rename = "console-level")]
    pub console_level: String,

    /// Minimum level written to the log file
    #[serde(rename = "file-level")]
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("books.log"),
            max_file_bytes: 500 * 1024,
            max_files: 5,
            console_level: "info".to_string(),
            file_level: "warn".to_string(),
        }
    }
}
