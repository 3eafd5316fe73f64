use thiserror::Error;

use crate::rules::{RulesError, TaxRules};

/// Errors returned by individual tax operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxCalculationError {
    /// The payment type is not one of dividend, interest, royalty or service.
    #[error("unrecognised withholding type '{0}'")]
    InvalidWithholdingType(String),
}

/// Calculator for Indonesian income tax, VAT and withholding.
///
/// This struct borrows an immutable [`TaxRules`] table and has no state of its
/// own, so it is `Copy` and can be shared freely across threads. Every
/// operation is a pure function of its arguments and the table.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use idtax_core::calculations::TaxCalculator;
///
/// let calculator = TaxCalculator::default();
/// let result = calculator.calculate_personal_tax(dec!(100000000), dec!(0));
///
/// assert_eq!(result.total_tax, dec!(9000000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxCalculator<'a> {
    pub(crate) rules: TaxRules<'a>,
}

impl<'a> TaxCalculator<'a> {
    /// Creates a calculator over the given rule table.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if the table fails [`TaxRules::validate`].
    pub fn new(rules: TaxRules<'a>) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &TaxRules<'a> {
        &self.rules
    }
}

impl Default for TaxCalculator<'static> {
    /// A calculator over [`TaxRules::INDONESIA_2025`].
    fn default() -> Self {
        Self {
            rules: TaxRules::INDONESIA_2025,
        }
    }
}
