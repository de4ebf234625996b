//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the valuer:
//! - Building the shared HTTP session from configuration
//! - GET requests for listing and detail pages
//! - Rejecting non-success statuses before any body is parsed
//! - Error classification

use crate::config::HttpConfig;
use crate::{FetchError, FetchFailure};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client shared by every request of a run
///
/// # Arguments
///
/// * `config` - The HTTP session configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use shelf_value::config::HttpConfig;
/// use shelf_value::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body as text
///
/// With a session the request reuses its connection pool; without one a
/// one-off request is made. A response whose status is not 2xx is an error,
/// its body is never returned.
///
/// # Arguments
///
/// * `session` - The shared HTTP client, if any
/// * `url` - The absolute URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The page body
/// * `Err(FetchError)` - Transport failure, bad status, or unreadable body
pub async fn fetch_page(session: Option<&Client>, url: &Url) -> Result<String, FetchError> {
    let sent = match session {
        Some(client) => client.get(url.clone()).send().await,
        None => reqwest::get(url.clone()).await,
    };

    let response = sent
        .and_then(|response| response.error_for_status())
        .map_err(|e| fetch_error(url, &e))?;

    response.text().await.map_err(|e| FetchError {
        url: url.to_string(),
        failure: FetchFailure::Body(e.to_string()),
    })
}

fn fetch_error(url: &Url, error: &reqwest::Error) -> FetchError {
    FetchError {
        url: url.to_string(),
        failure: classify(error),
    }
}

/// Maps a reqwest error onto the failure kinds the crawler reports
fn classify(error: &reqwest::Error) -> FetchFailure {
    if let Some(status) = error.status() {
        FetchFailure::Status(status.as_u16())
    } else if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        FetchFailure::Body(error.to_string())
    } else {
        FetchFailure::Other(error.to_string())
    }
}
