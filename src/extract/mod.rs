//! Field extraction from book detail pages
//!
//! Both fields are read with tolerant pattern matching: the price node mixes
//! a currency glyph with the number, and the stock count sits inside free
//! text. Every failure is logged and degrades to zero; extraction never
//! aborts the run.

mod price;
mod stock;

pub use price::{extract_unit_price, try_extract_unit_price};
pub use stock::{extract_stock_quantity, try_extract_stock_quantity};

use crate::crawler::Document;
use regex::Regex;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::sync::OnceLock;
use thiserror::Error;

/// Why a field could not be read from a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("invalid CSS selector '{0}'")]
    InvalidSelector(&'static str),

    #[error("invalid text pattern '{0}'")]
    InvalidPattern(&'static str),

    #[error("no node matches '{0}'")]
    MissingNode(&'static str),

    #[error("no {field} found in text '{text}'")]
    NoMatch { field: &'static str, text: String },

    #[error("cannot convert '{text}' to {field}: {reason}")]
    Conversion {
        field: &'static str,
        text: String,
        reason: String,
    },
}

/// A regex compiled lazily and shared for the life of the process
pub(crate) struct TextPattern {
    source: &'static str,
    compiled: OnceLock<Option<Regex>>,
}

impl TextPattern {
    pub(crate) const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    /// Leftmost match in `text`, if any
    pub(crate) fn first_match<'t>(&self, text: &'t str) -> Result<Option<&'t str>, ExtractError> {
        let regex = self
            .compiled
            .get_or_init(|| Regex::new(self.source).ok())
            .as_ref()
            .ok_or(ExtractError::InvalidPattern(self.source))?;
        Ok(regex.find(text).map(|m| m.as_str()))
    }
}

/// Price of one copy of a book
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct UnitPrice(pub f64);

/// Number of copies available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockQuantity(pub u32);

/// Unit price × stock quantity, for one book or summed over many
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct InventoryValue(pub f64);

impl Mul<StockQuantity> for UnitPrice {
    type Output = InventoryValue;

    fn mul(self, stock: StockQuantity) -> InventoryValue {
        InventoryValue(self.0 * f64::from(stock.0))
    }
}

impl Add for InventoryValue {
    type Output = InventoryValue;

    fn add(self, other: InventoryValue) -> InventoryValue {
        InventoryValue(self.0 + other.0)
    }
}

impl Sum for InventoryValue {
    fn sum<I: Iterator<Item = InventoryValue>>(iter: I) -> Self {
        iter.fold(InventoryValue::default(), Add::add)
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl fmt::Display for StockQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for InventoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// The fields read from one book detail page
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BookDetails {
    pub unit_price: UnitPrice,
    pub stock: StockQuantity,
}

impl BookDetails {
    /// Inventory value of this book
    pub fn value(&self) -> InventoryValue {
        self.unit_price * self.stock
    }
}

/// Reads unit price and stock quantity from a parsed detail page
///
/// Missing or malformed fields come back as zero.
pub fn extract_book_details(document: &Document) -> BookDetails {
    BookDetails {
        unit_price: extract_unit_price(document),
        stock: extract_stock_quantity(document),
    }
}
