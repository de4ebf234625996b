use crate::crawler::{node_text, CssQuery, Document};
use crate::extract::{ExtractError, TextPattern, UnitPrice};

static PRICE_NODE: CssQuery = CssQuery::new("p.price_color");
static PRICE_PATTERN: TextPattern = TextPattern::new(r"\d+\.\d{1,2}");

/// Reads the unit price, or explains why it could not
///
/// The first `digits.d` or `digits.dd` run in the price node is taken, so any
/// currency glyph around it is ignored.
pub fn try_extract_unit_price(document: &Document) -> Result<UnitPrice, ExtractError> {
    let node = document
        .select_first(&PRICE_NODE)?
        .ok_or(ExtractError::MissingNode(PRICE_NODE.css()))?;
    let text = node_text(&node);

    let number = PRICE_PATTERN
        .first_match(&text)?
        .ok_or_else(|| ExtractError::NoMatch {
            field: "price",
            text: text.trim().to_string(),
        })?;

    number
        .parse::<f64>()
        .map(UnitPrice)
        .map_err(|e| ExtractError::Conversion {
            field: "price",
            text: number.to_string(),
            reason: e.to_string(),
        })
}

/// Reads the unit price, logging and returning 0.00 on any failure
pub fn extract_unit_price(document: &Document) -> UnitPrice {
    try_extract_unit_price(document).unwrap_or_else(|e| {
        tracing::error!("Could not extract unit price: {}", e);
        UnitPrice::default()
    })
}
