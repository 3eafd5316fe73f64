//! Value-added tax (PPN).

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::TaxCalculator;
use crate::calculations::common::round_whole;

impl TaxCalculator<'_> {
    /// Calculates PPN on a transaction amount.
    ///
    /// Luxury goods pay the statutory rate; everything else pays the lower
    /// effective rate.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use idtax_core::calculations::TaxCalculator;
    ///
    /// let calculator = TaxCalculator::default();
    ///
    /// assert_eq!(calculator.calculate_vat(dec!(1000000), false), dec!(110000));
    /// assert_eq!(calculator.calculate_vat(dec!(1000000), true), dec!(120000));
    /// ```
    pub fn calculate_vat(
        &self,
        amount: Decimal,
        includes_luxury_tax: bool,
    ) -> Decimal {
        if amount < Decimal::ZERO {
            warn!(amount = %amount, "Negative amount passed to VAT calculation");
        }

        round_whole(amount * self.vat_rate(includes_luxury_tax))
    }

    fn vat_rate(
        &self,
        includes_luxury_tax: bool,
    ) -> Decimal {
        if includes_luxury_tax {
            self.rules.vat_standard_rate
        } else {
            self.rules.vat_effective_rate
        }
    }
}
