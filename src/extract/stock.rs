use crate::crawler::{node_text, CssQuery, Document};
use crate::extract::{ExtractError, StockQuantity, TextPattern};

static STOCK_NODE: CssQuery = CssQuery::new("p.instock.availability");
static STOCK_PATTERN: TextPattern = TextPattern::new(r"\d+");

/// Reads the stock quantity, or explains why it could not
pub fn try_extract_stock_quantity(document: &Document) -> Result<StockQuantity, ExtractError> {
    let node = document
        .select_first(&STOCK_NODE)?
        .ok_or(ExtractError::MissingNode(STOCK_NODE.css()))?;
    let text = node_text(&node);

    let digits = STOCK_PATTERN
        .first_match(&text)?
        .ok_or_else(|| ExtractError::NoMatch {
            field: "stock quantity",
            text: text.trim().to_string(),
        })?;

    digits
        .parse::<u32>()
        .map(StockQuantity)
        .map_err(|e| ExtractError::Conversion {
            field: "stock quantity",
            text: digits.to_string(),
            reason: e.to_string(),
        })
}

/// Reads the stock quantity, logging and returning 0 on any failure
pub fn extract_stock_quantity(document: &Document) -> StockQuantity {
    try_extract_stock_quantity(document).unwrap_or_else(|e| {
        tracing::error!("Could not extract stock quantity: {}", e);
        StockQuantity::default()
    })
}
