//! Listing page walker
//!
//! A listing page shows a grid of books, each title an anchor inside an
//! `<h3>`, and a pagination control `<li class="next"><a href=...>`. All
//! links are resolved against the listing page's own URL.

use crate::crawler::parser::{CssQuery, Document};
use url::Url;

static BOOK_LINKS: CssQuery = CssQuery::new("h3 > a");
static NEXT_PAGE: CssQuery = CssQuery::new("li.next > a");

/// Yields the absolute detail-page URL of every book on a listing page
///
/// URLs come out in document order, duplicates included. Anchors without a
/// usable href are skipped. If the page cannot be queried at all the error is
/// logged and the page contributes nothing.
///
/// # Arguments
///
/// * `page_url` - URL the listing page was fetched from
/// * `document` - The parsed listing page
///
/// # Example
///
/// ```
/// use shelf_value::crawler::{extract_book_links, Document};
/// use url::Url;
///
/// let page = Url::parse("https://books.example.com/catalogue/page-2.html").unwrap();
/// let document = Document::parse(r#"<h3><a href="a-light_1/index.html">A Light</a></h3>"#);
/// let links: Vec<Url> = extract_book_links(&page, &document).collect();
/// assert_eq!(links[0].as_str(), "https://books.example.com/catalogue/a-light_1/index.html");
/// ```
pub fn extract_book_links<'a>(
    page_url: &'a Url,
    document: &'a Document,
) -> impl Iterator<Item = Url> + 'a {
    let anchors = match document.select_all(&BOOK_LINKS) {
        Ok(anchors) => Some(anchors),
        Err(e) => {
            tracing::error!("Failed to extract book links on {}: {}", page_url, e);
            None
        }
    };

    anchors
        .into_iter()
        .flatten()
        .filter_map(move |anchor| resolve_link(page_url, anchor.value().attr("href")?))
}

/// Returns the absolute URL of the next listing page, if the page has one
///
/// Absence is the normal end of the catalogue, not an error.
pub fn extract_next_page_url(page_url: &Url, document: &Document) -> Option<Url> {
    let anchor = match document.select_first(&NEXT_PAGE) {
        Ok(anchor) => anchor,
        Err(e) => {
            tracing::error!("Failed to look up next page on {}: {}", page_url, e);
            return None;
        }
    };

    let next = anchor
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_link(page_url, href));

    if next.is_none() {
        tracing::info!("No 'next' control found on {}", page_url);
    }

    next
}

/// Resolves an href against the page it appeared on
///
/// Already-absolute hrefs come back unchanged. Empty hrefs and hrefs that
/// cannot be joined are dropped.
pub fn resolve_link(page_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        tracing::debug!("Skipping empty href on {}", page_url);
        return None;
    }

    match page_url.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Skipping unresolvable href '{}' on {}: {}", href, page_url, e);
            None
        }
    }
}
