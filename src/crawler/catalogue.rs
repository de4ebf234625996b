//! Catalogue crawler - lazy walk over the pagination chain
//!
//! The crawler holds at most one listing page's worth of book URLs at a time.
//! The next listing page is fetched only once every URL from the previous
//! one has been handed out, so valuation of the first books starts before
//! the rest of the catalogue has been discovered.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::listing::{extract_book_links, extract_next_page_url};
use crate::crawler::parser::Document;
use crate::crawler::retry::RetryPolicy;
use crate::CrawlError;
use futures::Stream;
use reqwest::Client;
use std::collections::VecDeque;
use url::Url;

/// Walks the catalogue one listing page at a time
pub struct CatalogueCrawler {
    /// Shared HTTP session
    client: Client,

    /// Retry policy for listing pages
    retry: RetryPolicy,

    /// Listing page to fetch once `pending` drains; `None` once the walk is over
    next_listing: Option<Url>,

    /// Book URLs from the current listing page not yet handed out
    pending: VecDeque<Url>,

    /// Number of listing pages fetched so far
    pages_visited: u32,
}

impl CatalogueCrawler {
    /// Creates a crawler positioned at the first listing page
    ///
    /// # Arguments
    ///
    /// * `client` - The shared HTTP session
    /// * `start_url` - First listing page of the catalogue
    /// * `retry` - Retry policy for listing-page fetches
    pub fn new(client: Client, start_url: Url, retry: RetryPolicy) -> Self {
        Self {
            client,
            retry,
            next_listing: Some(start_url),
            pending: VecDeque::new(),
            pages_visited: 0,
        }
    }

    /// Number of listing pages fetched so far
    pub fn pages_visited(&self) -> u32 {
        self.pages_visited
    }

    /// Returns the next book detail URL
    ///
    /// # Returns
    ///
    /// * `Some(Ok(url))` - The next book, in page then document order
    /// * `Some(Err(CrawlError))` - A listing page stayed unreachable after every
    ///   retry; the walk ends here
    /// * `None` - The last listing page has been exhausted
    pub async fn next_book(&mut self) -> Option<Result<Url, CrawlError>> {
        loop {
            if let Some(url) = self.pending.pop_front() {
                return Some(Ok(url));
            }

            let page_url = self.next_listing.take()?;
            match self.fetch_listing(&page_url).await {
                Ok(body) => self.visit(&page_url, &body),
                Err(e) => return Some(Err(e)),
            }
        }
    }

    /// Turns the crawler into a forward-only stream of book URLs
    pub fn into_stream(self) -> impl Stream<Item = Result<Url, CrawlError>> {
        futures::stream::unfold(self, |mut crawler| async move {
            let item = crawler.next_book().await?;
            Some((item, crawler))
        })
    }

    /// Queues the books of a fetched listing page and moves to the next one
    fn visit(&mut self, page_url: &Url, body: &str) {
        let document = Document::parse(body);
        self.pending.extend(extract_book_links(page_url, &document));
        self.next_listing = extract_next_page_url(page_url, &document);
        self.pages_visited += 1;

        tracing::debug!(
            "Listing page {} yielded {} books (page {})",
            page_url,
            self.pending.len(),
            self.pages_visited
        );
    }

    /// Fetches a listing page, retrying with backoff until the policy gives up
    async fn fetch_listing(&self, page_url: &Url) -> Result<String, CrawlError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::info!("Scraping listing page {}", page_url);

            match fetch_page(Some(&self.client), page_url).await {
                Ok(body) => return Ok(body),
                Err(e) if self.retry.should_retry(attempt) => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::error!(
                        "HTTP request for listing page {} failed (attempt {}/{}), retrying in {:?}: {}",
                        page_url,
                        attempt,
                        self.retry.max_attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        "Giving up on listing page {} after {} attempts: {}",
                        page_url,
                        attempt,
                        e
                    );
                    return Err(CrawlError::ListingUnreachable {
                        url: page_url.to_string(),
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }
}
