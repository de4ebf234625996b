//! Console report of a finished valuation

use crate::valuation::Valuation;

/// Formats the total the way the catalogue displays prices
pub fn format_total(valuation: &Valuation) -> String {
    format!("£{:.2}", valuation.total.0)
}

/// Prints the valuation to stdout
///
/// # Arguments
///
/// * `start_url` - The catalogue that was valued
/// * `valuation` - The finished valuation
pub fn print_valuation(start_url: &str, valuation: &Valuation) {
    println!();
    println!(
        "Total value of the books available on '{}':",
        start_url
    );
    println!("{}", format_total(valuation));
    println!();
    println!("  Books valued: {}", valuation.books_valued);
    println!("  Books skipped (fetch failed): {}", valuation.books_failed);

    if let Some(reason) = &valuation.listing_error {
        println!("  Warning: catalogue incomplete ({})", reason);
    }
}
