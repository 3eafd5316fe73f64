//! Common utility functions for tax calculations.
//!
//! This module provides the rounding rule shared by every operation: tax
//! amounts are carried at full precision and rounded to whole rupiah only at
//! the end of a calculation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to the nearest whole rupiah using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use idtax_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(1234.49)), dec!(1234));
/// assert_eq!(round_whole(dec!(1234.5)), dec!(1235));
/// assert_eq!(round_whole(dec!(-1234.5)), dec!(-1235)); // Away from zero
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use idtax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole tests
    // =========================================================================

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        let result = round_whole(dec!(110000.4999));

        assert_eq!(result, dec!(110000));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        let result = round_whole(dec!(110000.5));

        assert_eq!(result, dec!(110001));
    }

    #[test]
    fn round_whole_rounds_up_above_midpoint() {
        let result = round_whole(dec!(110000.51));

        assert_eq!(result, dec!(110001));
    }

    #[test]
    fn round_whole_handles_negative_values() {
        let result = round_whole(dec!(-0.5));

        assert_eq!(result, dec!(-1)); // Away from zero
    }

    #[test]
    fn round_whole_preserves_whole_values() {
        let result = round_whole(dec!(3000000));

        assert_eq!(result, dec!(3000000));
    }

    #[test]
    fn round_whole_handles_zero() {
        let result = round_whole(dec!(0.00));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        let result = max(dec!(100), dec!(200));

        assert_eq!(result, dec!(200));
    }

    #[test]
    fn max_returns_first_when_larger() {
        let result = max(dec!(200), dec!(100));

        assert_eq!(result, dec!(200));
    }

    #[test]
    fn max_floors_negative_at_zero() {
        let result = max(dec!(-50), Decimal::ZERO);

        assert_eq!(result, Decimal::ZERO);
    }
}
