use crate::config::types::{CatalogueConfig, Config, HttpConfig, LoggingConfig, RetryConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalogue_config(&config.catalogue)?;
    validate_http_config(&config.http)?;
    validate_retry_config(&config.retry)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates the catalogue start URL
fn validate_catalogue_config(config: &CatalogueConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start-url '{}': {}", config.start_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "start-url '{}' must use http or https",
            config.start_url
        )));
    }

    Ok(())
}

/// Validates HTTP session configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the listing retry policy
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.initial_backoff_ms > config.max_backoff_ms {
        return Err(ConfigError::Validation(format!(
            "initial-backoff-ms ({}) cannot exceed max-backoff-ms ({})",
            config.initial_backoff_ms, config.max_backoff_ms
        )));
    }

    Ok(())
}

/// Validates the diagnostics configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if config.file.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "logging file cannot be empty".to_string(),
        ));
    }

    if config.max_file_bytes < 1024 {
        return Err(ConfigError::Validation(format!(
            "max-file-bytes must be >= 1024, got {}",
            config.max_file_bytes
        )));
    }

    validate_level("console-level", &config.console_level)?;
    validate_level("file-level", &config.file_level)?;

    Ok(())
}

fn validate_level(key: &str, level: &str) -> Result<(), ConfigError> {
    level.parse::<tracing::Level>().map(|_| ()).map_err(|_| {
        ConfigError::Validation(format!(
            "{} must be one of trace, debug, info, warn, error; got '{}'",
            key, level
        ))
    })
}
