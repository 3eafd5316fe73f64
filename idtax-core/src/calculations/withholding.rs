//! Withholding tax (PPh23) on dividends, interest, royalties and services.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::round_whole;
use crate::calculations::{TaxCalculationError, TaxCalculator};
use crate::models::WithholdingType;

impl TaxCalculator<'_> {
    /// Calculates withholding for a raw payment-type tag.
    ///
    /// There is no fallback rate: an unrecognised tag is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculationError::InvalidWithholdingType`] if `kind` is not
    /// one of `dividend`, `interest`, `royalty` or `service`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use idtax_core::calculations::TaxCalculator;
    ///
    /// let calculator = TaxCalculator::default();
    ///
    /// assert_eq!(calculator.calculate_withholding("service", dec!(1000000)), Ok(dec!(20000)));
    /// assert!(calculator.calculate_withholding("unknown", dec!(1000000)).is_err());
    /// ```
    pub fn calculate_withholding(
        &self,
        kind: &str,
        amount: Decimal,
    ) -> Result<Decimal, TaxCalculationError> {
        let kind = WithholdingType::parse(kind)
            .ok_or_else(|| TaxCalculationError::InvalidWithholdingType(kind.to_string()))?;

        Ok(self.calculate_withholding_for(kind, amount))
    }

    /// Calculates withholding for an already-validated payment type.
    pub fn calculate_withholding_for(
        &self,
        kind: WithholdingType,
        amount: Decimal,
    ) -> Decimal {
        if amount < Decimal::ZERO {
            warn!(
                kind = %kind,
                amount = %amount,
                "Negative amount passed to withholding calculation"
            );
        }

        round_whole(amount * self.rules.withholding.rate_for(kind))
    }
}
