//! Display formatting for rupiah amounts and rates.
//!
//! These helpers only change how a value is written. Tax amounts are already
//! rounded by the calculations; fractional inputs such as breakdown slice taxes
//! are shown to the nearest rupiah without altering the underlying value.

use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_SYMBOL: &str = "Rp";
const THOUSANDS_SEPARATOR: char = '.';

/// Formats an amount as Indonesian rupiah with no decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use idtax_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(60000000)), "Rp 60.000.000");
/// assert_eq!(format_currency(dec!(-1500)), "-Rp 1.500");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = group_thousands(&whole.abs().trunc().to_string());

    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-{CURRENCY_SYMBOL} {digits}")
    } else {
        format!("{CURRENCY_SYMBOL} {digits}")
    }
}

/// Formats a fractional rate as a percentage with two decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use idtax_core::format::format_percentage;
///
/// assert_eq!(format_percentage(dec!(0.11)), "11.00%");
/// assert_eq!(format_percentage(dec!(0.0325)), "3.25%");
/// ```
pub fn format_percentage(rate: Decimal) -> String {
    let mut percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(2);
    format!("{percent}%")
}

/// Labels a bracket range, e.g. `Rp 0 - Rp 60.000.000` or `> Rp 5.000.000.000`.
pub fn format_bracket_label(
    min_income: Decimal,
    max_income: Option<Decimal>,
) -> String {
    match max_income {
        Some(max) => format!("{} - {}", format_currency(min_income), format_currency(max)),
        None => format!("> {}", format_currency(min_income)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
