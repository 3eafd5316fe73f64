//! Progressive personal income tax (PPh21).
//!
//! Taxable income is split across the bracket schedule from the bottom up.
//! Each bracket taxes only the slice of income between its own upper bound
//! and the previous bracket's upper bound:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable income = max(0, gross income - deductions) |
//! | 2    | For each bracket: slice = min(remaining income, bracket width) |
//! | 3    | Slice tax = slice × bracket rate |
//! | 4    | Stop as soon as remaining income reaches zero |
//! | 5    | Round total tax and net income to whole rupiah |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use idtax_core::calculations::TaxCalculator;
//!
//! let result = TaxCalculator::default().calculate_personal_tax(dec!(100000000), dec!(0));
//!
//! assert_eq!(result.total_tax, dec!(9000000));
//! assert_eq!(result.net_income, dec!(91000000));
//! assert_eq!(result.effective_rate, dec!(9));
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::TaxCalculator;
use crate::calculations::common::{max, round_whole};
use crate::format::format_bracket_label;
use crate::models::{BracketBreakdown, TaxResult};

impl TaxCalculator<'_> {
    /// Calculates progressive income tax on `gross_income` less `deductions`.
    ///
    /// Only `total_tax` and `net_income` are rounded; the breakdown and the
    /// effective rate keep full precision.
    pub fn calculate_personal_tax(
        &self,
        gross_income: Decimal,
        deductions: Decimal,
    ) -> TaxResult {
        if gross_income < Decimal::ZERO || deductions < Decimal::ZERO {
            warn!(
                gross_income = %gross_income,
                deductions = %deductions,
                "Negative income or deductions passed to progressive calculation"
            );
        }

        let taxable_income = self.taxable_income(gross_income, deductions);
        let (unrounded_tax, breakdown) = self.apply_brackets(taxable_income);
        let effective_rate = self.effective_rate(unrounded_tax, taxable_income);

        debug!(
            taxable_income = %taxable_income,
            tax = %unrounded_tax,
            brackets = breakdown.len(),
            "Progressive tax calculated"
        );

        TaxResult {
            gross_income,
            deductions,
            taxable_income,
            total_tax: round_whole(unrounded_tax),
            net_income: round_whole(taxable_income - unrounded_tax),
            effective_rate,
            breakdown,
        }
    }

    /// Gross income less deductions, floored at zero.
    ///
    /// Saturates at [`Decimal::MAX`] when negative deductions push the
    /// difference out of range.
    fn taxable_income(
        &self,
        gross_income: Decimal,
        deductions: Decimal,
    ) -> Decimal {
        match gross_income.checked_sub(deductions) {
            Some(taxable) => max(taxable, Decimal::ZERO),
            None if deductions < Decimal::ZERO => Decimal::MAX,
            None => Decimal::ZERO,
        }
    }

    /// Walks the bracket schedule, returning the unrounded total and one
    /// breakdown line per bracket that received income.
    fn apply_brackets(
        &self,
        taxable_income: Decimal,
    ) -> (Decimal, Vec<BracketBreakdown>) {
        let mut remaining = taxable_income;
        let mut previous_max = Decimal::ZERO;
        let mut total_tax = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for bracket in self.rules.personal_brackets {
            if remaining <= Decimal::ZERO {
                break;
            }

            let taxable_in_bracket = match bracket.width(previous_max) {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            let bracket_tax = taxable_in_bracket * bracket.tax_rate;

            total_tax += bracket_tax;
            remaining -= taxable_in_bracket;

            if taxable_in_bracket > Decimal::ZERO {
                breakdown.push(BracketBreakdown {
                    bracket: format_bracket_label(previous_max, bracket.max_income),
                    taxable_amount: taxable_in_bracket,
                    rate: bracket.tax_rate,
                    tax: bracket_tax,
                });
            }

            if let Some(max_income) = bracket.max_income {
                previous_max = max_income;
            }
        }

        (total_tax, breakdown)
    }

    /// Tax as a percentage of taxable income; zero when nothing is taxable.
    fn effective_rate(
        &self,
        total_tax: Decimal,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income > Decimal::ZERO {
            total_tax / taxable_income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxBracket;
    use crate::rules::TaxRules;

    fn calculator() -> TaxCalculator<'static> {
        TaxCalculator::default()
    }

    // =========================================================================
    // taxable_income tests
    // =========================================================================

    #[test]
    fn taxable_income_subtracts_deductions() {
        let result = calculator().taxable_income(dec!(100000000), dec!(54000000));

        assert_eq!(result, dec!(46000000));
    }

    #[test]
    fn taxable_income_returns_zero_when_deductions_exceed_gross() {
        let result = calculator().taxable_income(dec!(50000000), dec!(54000000));

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn taxable_income_saturates_instead_of_overflowing() {
        let taxable = calculator().taxable_income(Decimal::MAX, dec!(-1));

        assert_eq!(taxable, Decimal::MAX);
    }

    #[test]
    fn taxable_income_floors_when_difference_underflows() {
        let taxable = calculator().taxable_income(Decimal::MIN, dec!(1));

        assert_eq!(taxable, Decimal::ZERO);
    }

    // =========================================================================
    // apply_brackets tests
    // =========================================================================

    #[test]
    fn apply_brackets_first_bracket_only() {
        let (tax, breakdown) = calculator().apply_brackets(dec!(60000000));

        assert_eq!(tax, dec!(3000000));
        assert_eq!(
            breakdown,
            vec![BracketBreakdown {
                bracket: "Rp 0 - Rp 60.000.000".to_string(),
                taxable_amount: dec!(60000000),
                rate: dec!(0.05),
                tax: dec!(3000000),
            }]
        );
    }

    #[test]
    fn apply_brackets_skips_untouched_brackets() {
        let (_, breakdown) = calculator().apply_brackets(dec!(300000000));

        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[2].bracket, "Rp 250.000.000 - Rp 500.000.000");
        assert_eq!(breakdown[2].taxable_amount, dec!(50000000));
    }

    #[test]
    fn apply_brackets_reaches_unbounded_bracket() {
        let (tax, breakdown) = calculator().apply_brackets(dec!(6000000000));

        // 3M + 28.5M + 62.5M + 1.35B + 350M
        assert_eq!(tax, dec!(1794000000));
        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[4].bracket, "> Rp 5.000.000.000");
        assert_eq!(breakdown[4].taxable_amount, dec!(1000000000));
        assert_eq!(breakdown[4].tax, dec!(350000000));
    }

    #[test]
    fn apply_brackets_returns_nothing_for_zero_income() {
        let (tax, breakdown) = calculator().apply_brackets(Decimal::ZERO);

        assert_eq!(tax, Decimal::ZERO);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn apply_brackets_keeps_slice_precision() {
        let (tax, breakdown) = calculator().apply_brackets(dec!(60000010));

        assert_eq!(tax, dec!(3000001.5));
        assert_eq!(breakdown[1].tax, dec!(1.5));
    }

    // =========================================================================
    // effective_rate tests
    // =========================================================================

    #[test]
    fn effective_rate_is_percentage_of_taxable_income() {
        let result = calculator().effective_rate(dec!(9000000), dec!(100000000));

        assert_eq!(result, dec!(9));
    }

    #[test]
    fn effective_rate_is_zero_without_taxable_income() {
        let result = calculator().effective_rate(Decimal::ZERO, Decimal::ZERO);

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // calculate_personal_tax tests
    // =========================================================================

    #[test]
    fn calculate_entirely_in_first_bracket() {
        let result = calculator().calculate_personal_tax(dec!(60000000), Decimal::ZERO);

        assert_eq!(result.total_tax, dec!(3000000));
        assert_eq!(result.net_income, dec!(57000000));
        assert_eq!(result.effective_rate, dec!(5));
    }

    #[test]
    fn calculate_spanning_two_brackets() {
        let result = calculator().calculate_personal_tax(dec!(100000000), Decimal::ZERO);

        // 3,000,000 + 40,000,000 × 15%
        assert_eq!(result.total_tax, dec!(9000000));
        assert_eq!(result.breakdown[1].taxable_amount, dec!(40000000));
        assert_eq!(result.breakdown[1].tax, dec!(6000000));
    }

    #[test]
    fn calculate_applies_deductions_before_brackets() {
        let result = calculator().calculate_personal_tax(dec!(154000000), dec!(54000000));

        assert_eq!(result.gross_income, dec!(154000000));
        assert_eq!(result.deductions, dec!(54000000));
        assert_eq!(result.taxable_income, dec!(100000000));
        assert_eq!(result.total_tax, dec!(9000000));
    }

    #[test]
    fn calculate_with_deductions_exceeding_income() {
        let result = calculator().calculate_personal_tax(dec!(40000000), dec!(54000000));

        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.net_income, Decimal::ZERO);
        assert_eq!(result.effective_rate, Decimal::ZERO);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn calculate_rounds_total_and_net_from_unrounded_tax() {
        let result = calculator().calculate_personal_tax(dec!(60000010), Decimal::ZERO);

        assert_eq!(result.total_tax, dec!(3000002));
        // 60,000,010 - 3,000,001.5 = 57,000,008.5
        assert_eq!(result.net_income, dec!(57000009));
    }

    #[test]
    fn calculate_negative_gross_is_treated_as_zero_taxable() {
        let result = calculator().calculate_personal_tax(dec!(-1000), Decimal::ZERO);

        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn calculate_with_negative_deductions_at_decimal_max_does_not_overflow() {
        let result = calculator().calculate_personal_tax(Decimal::MAX, dec!(-1));

        assert_eq!(result.taxable_income, Decimal::MAX);
        assert!(result.total_tax > Decimal::ZERO);
    }

    #[test]
    fn breakdown_amounts_sum_to_taxable_income() {
        for gross in [
            dec!(0),
            dec!(1),
            dec!(59999999.99),
            dec!(60000000),
            dec!(123456789.12),
            dec!(250000000),
            dec!(499999999),
            dec!(5000000000),
            dec!(98765432100),
        ] {
            let result = calculator().calculate_personal_tax(gross, dec!(1000000));
            let allocated: Decimal = result.breakdown.iter().map(|b| b.taxable_amount).sum();

            assert_eq!(allocated, result.taxable_income, "gross {gross}");
        }
    }

    #[test]
    fn total_tax_is_monotonic_in_gross_income() {
        let mut previous = Decimal::ZERO;
        let mut gross = Decimal::ZERO;

        while gross <= dec!(6000000000) {
            let tax = calculator().calculate_personal_tax(gross, Decimal::ZERO).total_tax;
            assert!(tax >= previous, "tax decreased at gross {gross}");
            previous = tax;
            gross += dec!(37500000);
        }
    }

    #[test]
    fn calculate_is_idempotent() {
        let first = calculator().calculate_personal_tax(dec!(777777777), dec!(12345));
        let second = calculator().calculate_personal_tax(dec!(777777777), dec!(12345));

        assert_eq!(first, second);
    }

    #[test]
    fn calculate_with_custom_single_bracket_schedule() {
        let brackets = [TaxBracket {
            max_income: None,
            tax_rate: dec!(0.10),
        }];
        let rules = TaxRules {
            personal_brackets: &brackets,
            ..TaxRules::INDONESIA_2025
        };
        let calculator = TaxCalculator::new(rules).expect("valid rules");

        let result = calculator.calculate_personal_tax(dec!(1000), Decimal::ZERO);

        assert_eq!(result.total_tax, dec!(100));
        assert_eq!(result.breakdown[0].bracket, "> Rp 0");
    }
}
