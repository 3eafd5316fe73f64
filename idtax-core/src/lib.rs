pub mod calculations;
pub mod format;
pub mod models;
pub mod rules;

pub use calculations::{TaxCalculationError, TaxCalculator};
pub use models::*;
pub use rules::{RulesError, TaxRules, WithholdingRates};
