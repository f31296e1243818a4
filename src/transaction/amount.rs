//! Parsing and formatting of money amounts as they appear in forms and stored rows.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a textual amount, accepting either a decimal point or a decimal comma.
///
/// Returns `None` if the text is not a number after normalization.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let normalized = text.trim().replace(',', ".");

    if normalized.is_empty() {
        return None;
    }

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// The largest amount a transaction may have, 999,999,999,999.99.
///
/// Keeps sums of any realistic table far from the limits of [Decimal], and
/// amounts exact to the cent when converted to `f64` for display.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

/// Formats an amount with exactly two decimal places and no currency symbol, e.g. "12.50".
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
