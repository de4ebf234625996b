//! Crawler module for catalogue discovery
//!
//! This module contains the crawl-side logic, including:
//! - HTTP fetching through a shared session
//! - HTML parsing and selector queries
//! - Book link and pagination extraction from listing pages
//! - The lazy, retrying walk over the whole catalogue

mod catalogue;
mod fetcher;
mod listing;
mod parser;
mod retry;

pub use catalogue::CatalogueCrawler;
pub use fetcher::{build_http_client, fetch_page};
pub use listing::{extract_book_links, extract_next_page_url, resolve_link};
pub use parser::{node_text, CssQuery, Document};
pub use retry::RetryPolicy;

use crate::config::Config;
use crate::{CrawlError, ValuationError};
use futures::Stream;
use reqwest::Client;
use url::Url;

/// Streams every book URL of the configured catalogue
///
/// This is the entry point for the crawl side. It starts at the configured
/// listing page and follows 'next' controls until the last page.
///
/// # Arguments
///
/// * `client` - The HTTP session, shared with whoever consumes the stream
/// * `config` - The valuer configuration
///
/// # Returns
///
/// * `Ok(stream)` - A lazy stream of book detail URLs
/// * `Err(ValuationError)` - The start URL could not be parsed
pub fn crawl(
    client: Client,
    config: &Config,
) -> Result<impl Stream<Item = Result<Url, CrawlError>>, ValuationError> {
    let start_url = Url::parse(&config.catalogue.start_url)?;
    let crawler = CatalogueCrawler::new(client, start_url, RetryPolicy::from(&config.retry));
    Ok(crawler.into_stream())
}
