//! Monthly effective-rate withholding (TER).
//!
//! Unlike the annual progressive schedule, each monthly income is taxed in
//! full at the single rate of the band it falls into.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::TaxCalculator;
use crate::calculations::common::round_whole;
use crate::models::MonthlyRateBand;

impl<'a> TaxCalculator<'a> {
    /// Looks up the monthly band for `monthly_gross_income` and applies its rate.
    ///
    /// Returns zero when no band contains the income.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use idtax_core::calculations::TaxCalculator;
    ///
    /// let calculator = TaxCalculator::default();
    ///
    /// assert_eq!(calculator.calculate_monthly_withholding(dec!(5000000)), dec!(0));
    /// assert_eq!(calculator.calculate_monthly_withholding(dec!(6000000)), dec!(120000));
    /// ```
    pub fn calculate_monthly_withholding(
        &self,
        monthly_gross_income: Decimal,
    ) -> Decimal {
        match self.monthly_band(monthly_gross_income) {
            Some(band) => round_whole(monthly_gross_income * band.rate),
            None => {
                warn!(
                    monthly_gross_income = %monthly_gross_income,
                    "No monthly rate band contains income; withholding is zero"
                );
                Decimal::ZERO
            }
        }
    }

    /// The band lives in the rule table, not in `self`.
    fn monthly_band(
        &self,
        monthly_gross_income: Decimal,
    ) -> Option<&'a MonthlyRateBand> {
        self.rules
            .monthly_bands
            .iter()
            .find(|band| band.contains(monthly_gross_income))
    }
}
