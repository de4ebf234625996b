//! HTML document wrapper for selector queries
//!
//! Parsing never fails: malformed markup produces a best-effort tree. Selectors
//! are compiled once on first use; a selector that does not compile surfaces
//! as an [`ExtractError::InvalidSelector`] at query time.

use crate::extract::ExtractError;
use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// A CSS selector compiled lazily and shared for the life of the process
pub struct CssQuery {
    css: &'static str,
    compiled: OnceLock<Option<Selector>>,
}

impl CssQuery {
    pub const fn new(css: &'static str) -> Self {
        Self {
            css,
            compiled: OnceLock::new(),
        }
    }

    /// The selector source text
    pub fn css(&self) -> &'static str {
        self.css
    }

    /// Returns the compiled selector
    pub fn selector(&self) -> Result<&Selector, ExtractError> {
        self.compiled
            .get_or_init(|| Selector::parse(self.css).ok())
            .as_ref()
            .ok_or(ExtractError::InvalidSelector(self.css))
    }
}

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw HTML text into a queryable tree
    ///
    /// # Example
    ///
    /// ```
    /// use shelf_value::crawler::{CssQuery, Document};
    ///
    /// static TITLE: CssQuery = CssQuery::new("h3 > a");
    ///
    /// let document = Document::parse(r#"<h3><a href="book/index.html">A Book</a></h3>"#);
    /// let anchor = document.select_first(&TITLE).unwrap().unwrap();
    /// assert_eq!(anchor.value().attr("href"), Some("book/index.html"));
    /// ```
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// First element matching the query, in document order
    pub fn select_first(&self, query: &CssQuery) -> Result<Option<ElementRef<'_>>, ExtractError> {
        Ok(self.html.select(query.selector()?).next())
    }

    /// All elements matching the query, lazily, in document order
    pub fn select_all<'a>(
        &'a self,
        query: &'static CssQuery,
    ) -> Result<Select<'a, 'static>, ExtractError> {
        Ok(self.html.select(query.selector()?))
    }
}

/// Concatenated text content of an element
pub fn node_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}
