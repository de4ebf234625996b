//! Valuation driver
//!
//! Consumes the stream of book URLs, fetches each detail page through the
//! shared session, extracts price and stock, and keeps a running total.
//! A book whose page cannot be fetched is logged and counted as zero.

mod report;

pub use report::{format_total, print_valuation};

use crate::config::Config;
use crate::crawler::{build_http_client, crawl, fetch_page, Document};
use crate::extract::{extract_book_details, InventoryValue};
use crate::{CrawlError, FetchError, ValuationError};
use futures::{Stream, StreamExt};
use reqwest::Client;
use url::Url;

/// Outcome of one valuation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    /// Sum of unit price × stock over every book valued
    pub total: InventoryValue,

    /// Books whose detail page was fetched
    pub books_valued: u64,

    /// Books whose detail page could not be fetched
    pub books_failed: u64,

    /// Why the catalogue walk stopped early, if it did
    pub listing_error: Option<String>,
}

impl Valuation {
    /// Adds one book's value to the running total
    pub fn record(&mut self, value: InventoryValue) {
        self.total = self.total + value;
        self.books_valued += 1;
    }

    /// True when every listing page was reached
    pub fn is_complete(&self) -> bool {
        self.listing_error.is_none()
    }
}

/// Values books one detail page at a time
pub struct Valuer {
    client: Client,
}

impl Valuer {
    /// Creates a valuer that fetches through the given session
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one detail page and returns its inventory value
    ///
    /// Missing or malformed fields on the page count as zero; only a failed
    /// fetch is an error.
    pub async fn value_book(&self, url: &Url) -> Result<InventoryValue, FetchError> {
        let body = fetch_page(Some(&self.client), url).await?;
        let details = extract_book_details(&Document::parse(&body));
        let value = details.value();

        tracing::info!(
            "Value recovered from {}: {} ({} x {})",
            url,
            value,
            details.unit_price,
            details.stock
        );
        Ok(value)
    }

    /// Values every book the stream yields, in order
    ///
    /// # Arguments
    ///
    /// * `books` - Book detail URLs, typically from [`crate::CatalogueCrawler::into_stream`]
    ///
    /// # Returns
    ///
    /// The accumulated [`Valuation`]; never fails
    pub async fn run<S>(&self, books: S) -> Valuation
    where
        S: Stream<Item = Result<Url, CrawlError>>,
    {
        futures::pin_mut!(books);
        let mut valuation = Valuation::default();

        while let Some(next) = books.next().await {
            match next {
                Ok(url) => match self.value_book(&url).await {
                    Ok(value) => valuation.record(value),
                    Err(e) => {
                        tracing::error!("HTTP request for book page failed: {}", e);
                        valuation.books_failed += 1;
                    }
                },
                Err(e) => {
                    tracing::error!("Catalogue walk stopped early: {}", e);
                    valuation.listing_error = Some(e.to_string());
                }
            }
        }

        tracing::info!(
            "Valued {} books ({} failed), total {}",
            valuation.books_valued,
            valuation.books_failed,
            valuation.total
        );
        valuation
    }
}

/// Values the whole configured catalogue
///
/// One HTTP session is built and shared between the catalogue walk and the
/// detail-page fetches.
///
/// # Arguments
///
/// * `config` - The valuer configuration
///
/// # Returns
///
/// * `Ok(Valuation)` - The run finished, possibly with an early-stopped walk
/// * `Err(ValuationError)` - The session or start URL could not be set up
pub async fn value_catalogue(config: &Config) -> Result<Valuation, ValuationError> {
    let client = build_http_client(&config.http)?;
    let books = crawl(client.clone(), config)?;
    Ok(Valuer::new(client).run(books).await)
}
