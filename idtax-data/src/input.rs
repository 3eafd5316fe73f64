use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a command-line amount cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips whitespace and the `,` / `_` digit separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace([',', '_'], "")
}

/// Parses a rupiah amount such as `4,800,000,000` or `60_000_000`.
///
/// Dots are decimal points, never thousands separators.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}
