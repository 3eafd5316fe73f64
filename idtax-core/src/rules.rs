//! Indonesian tax rule tables.
//!
//! The built-in table for tax year 2025 is exposed as
//! [`TaxRules::INDONESIA_2025`]. Tables are plain borrowed data and are never
//! mutated once constructed.
//!
//! # Personal income (PPh21) brackets
//!
//! | Taxable income (Rp)           | Rate |
//! |-------------------------------|------|
//! | 0 - 60,000,000                | 5%   |
//! | 60,000,000 - 250,000,000      | 15%  |
//! | 250,000,000 - 500,000,000     | 25%  |
//! | 500,000,000 - 5,000,000,000   | 30%  |
//! | above 5,000,000,000           | 35%  |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use crate::models::{MonthlyRateBand, TaxBracket, WithholdingType};

/// Structural problems in a rule table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("no personal tax brackets provided")]
    NoBrackets,

    /// Bracket upper bounds must be strictly increasing.
    #[error("bracket {index} upper bound {max} does not exceed the previous bound {previous}")]
    BracketBoundsNotIncreasing {
        index: usize,
        previous: Decimal,
        max: Decimal,
    },

    /// Only the final bracket may be unbounded, and it must be.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBracketNotLast(usize),

    #[error("the last bracket must be unbounded")]
    LastBracketBounded,

    #[error("{name} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { name: &'static str, rate: Decimal },

    #[error("no monthly rate bands provided")]
    NoMonthlyBands,

    #[error("the first monthly band must start at 0, got {min_income}")]
    FirstMonthlyBandNotAtZero { min_income: Decimal },

    #[error("monthly band {index} is malformed or overlaps the previous band")]
    MonthlyBandOutOfOrder { index: usize },

    /// Bands have inclusive whole-rupiah bounds, so each must start one
    /// rupiah after the previous one ends.
    #[error("monthly band {index} leaves a gap after the previous band")]
    MonthlyBandGap { index: usize },

    #[error("the last monthly band must be open-ended")]
    LastMonthlyBandBounded,
}

/// Flat PPh23 rates per payment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WithholdingRates {
    pub dividend: Decimal,
    pub interest: Decimal,
    pub royalty: Decimal,
    pub service: Decimal,
}

impl WithholdingRates {
    pub fn rate_for(
        &self,
        kind: WithholdingType,
    ) -> Decimal {
        match kind {
            WithholdingType::Dividend => self.dividend,
            WithholdingType::Interest => self.interest,
            WithholdingType::Royalty => self.royalty,
            WithholdingType::Service => self.service,
        }
    }
}

/// The complete set of rates and tables the calculator works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxRules<'a> {
    pub tax_year: i32,

    /// Progressive PPh21 schedule, ascending by upper bound.
    pub personal_brackets: &'a [TaxBracket],

    /// Statutory PPN rate, applied to luxury goods.
    pub vat_standard_rate: Decimal,

    /// Effective PPN rate applied to everything else.
    pub vat_effective_rate: Decimal,

    pub withholding: WithholdingRates,

    pub corporate_rate: Decimal,
    pub small_business_rate: Decimal,

    /// Annual revenue below which the small-business rate applies.
    pub small_business_threshold: Decimal,

    /// Monthly effective-rate (TER) bands, ascending.
    pub monthly_bands: &'a [MonthlyRateBand],
}

const PERSONAL_BRACKETS_2025: [TaxBracket; 5] = [
    TaxBracket {
        max_income: Some(dec!(60000000)),
        tax_rate: dec!(0.05),
    },
    TaxBracket {
        max_income: Some(dec!(250000000)),
        tax_rate: dec!(0.15),
    },
    TaxBracket {
        max_income: Some(dec!(500000000)),
        tax_rate: dec!(0.25),
    },
    TaxBracket {
        max_income: Some(dec!(5000000000)),
        tax_rate: dec!(0.30),
    },
    TaxBracket {
        max_income: None,
        tax_rate: dec!(0.35),
    },
];

const fn band(
    min_income: Decimal,
    max_income: Option<Decimal>,
    rate: Decimal,
) -> MonthlyRateBand {
    MonthlyRateBand {
        min_income,
        max_income,
        rate,
    }
}

const MONTHLY_BANDS_2025: [MonthlyRateBand; 11] = [
    band(dec!(0), Some(dec!(5400000)), dec!(0)),
    band(dec!(5400001), Some(dec!(5650000)), dec!(0.005)),
    band(dec!(5650001), Some(dec!(5950000)), dec!(0.01)),
    band(dec!(5950001), Some(dec!(6300000)), dec!(0.02)),
    band(dec!(6300001), Some(dec!(6750000)), dec!(0.02)),
    band(dec!(6750001), Some(dec!(7500000)), dec!(0.025)),
    band(dec!(7500001), Some(dec!(8550000)), dec!(0.03)),
    band(dec!(8550001), Some(dec!(9650000)), dec!(0.035)),
    band(dec!(9650001), Some(dec!(10050000)), dec!(0.04)),
    band(dec!(10050001), Some(dec!(10350000)), dec!(0.045)),
    band(dec!(10350001), None, dec!(0.05)),
];

impl TaxRules<'static> {
    /// Rates in force for tax year 2025.
    pub const INDONESIA_2025: TaxRules<'static> = TaxRules {
        tax_year: 2025,
        personal_brackets: &PERSONAL_BRACKETS_2025,
        vat_standard_rate: dec!(0.12),
        vat_effective_rate: dec!(0.11),
        withholding: WithholdingRates {
            dividend: dec!(0.15),
            interest: dec!(0.15),
            royalty: dec!(0.15),
            service: dec!(0.02),
        },
        corporate_rate: dec!(0.22),
        small_business_rate: dec!(0.11),
        small_business_threshold: dec!(4800000000),
        monthly_bands: &MONTHLY_BANDS_2025,
    };
}

impl Default for TaxRules<'static> {
    fn default() -> Self {
        Self::INDONESIA_2025
    }
}

impl TaxRules<'_> {
    /// Validates the structure of every table.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if:
    /// - there are no brackets, or bracket bounds are not strictly increasing
    /// - the unbounded bracket is missing or not last
    /// - any rate is outside [0, 1]
    /// - monthly bands are empty, do not start at 0, overlap or leave a gap
    /// - the last monthly band is bounded
    pub fn validate(&self) -> Result<(), RulesError> {
        self.validate_brackets()?;
        self.validate_flat_rates()?;
        self.validate_monthly_bands()
    }

    fn validate_brackets(&self) -> Result<(), RulesError> {
        let last = self
            .personal_brackets
            .len()
            .checked_sub(1)
            .ok_or(RulesError::NoBrackets)?;

        let mut previous = Decimal::ZERO;
        for (index, bracket) in self.personal_brackets.iter().enumerate() {
            check_rate("bracket", bracket.tax_rate)?;

            match bracket.max_income {
                Some(max) if max <= previous => {
                    return Err(RulesError::BracketBoundsNotIncreasing {
                        index,
                        previous,
                        max,
                    });
                }
                Some(_) if index == last => return Err(RulesError::LastBracketBounded),
                Some(max) => previous = max,
                None if index != last => return Err(RulesError::UnboundedBracketNotLast(index)),
                None => {}
            }
        }

        Ok(())
    }

    fn validate_flat_rates(&self) -> Result<(), RulesError> {
        check_rate("VAT standard", self.vat_standard_rate)?;
        check_rate("VAT effective", self.vat_effective_rate)?;
        for kind in WithholdingType::ALL {
            check_rate(kind.as_str(), self.withholding.rate_for(kind))?;
        }
        check_rate("corporate", self.corporate_rate)?;
        check_rate("small business", self.small_business_rate)
    }

    fn validate_monthly_bands(&self) -> Result<(), RulesError> {
        let last = self
            .monthly_bands
            .len()
            .checked_sub(1)
            .ok_or(RulesError::NoMonthlyBands)?;

        let first_min = self.monthly_bands[0].min_income;
        if first_min != Decimal::ZERO {
            return Err(RulesError::FirstMonthlyBandNotAtZero {
                min_income: first_min,
            });
        }

        let mut previous_max: Option<Decimal> = None;
        for (index, band) in self.monthly_bands.iter().enumerate() {
            check_rate("monthly band", band.rate)?;

            let ordered = previous_max.is_none_or(|prev| band.min_income > prev);
            let well_formed = band.max_income.is_none_or(|max| max >= band.min_income);
            if !ordered || !well_formed {
                return Err(RulesError::MonthlyBandOutOfOrder { index });
            }
            if previous_max.is_some_and(|prev| band.min_income > prev + Decimal::ONE) {
                return Err(RulesError::MonthlyBandGap { index });
            }

            match band.max_income {
                Some(_) if index == last => return Err(RulesError::LastMonthlyBandBounded),
                Some(max) => previous_max = Some(max),
                None if index != last => return Err(RulesError::MonthlyBandOutOfOrder { index }),
                None => {}
            }
        }

        Ok(())
    }
}

fn check_rate(
    name: &'static str,
    rate: Decimal,
) -> Result<(), RulesError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(RulesError::RateOutOfRange { name, rate });
    }
    Ok(())
}
