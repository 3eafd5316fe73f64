use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a progressive calculation: the slice of income that fell into
/// a single bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    /// Human-readable bracket range, e.g. `Rp 0 - Rp 60.000.000`.
    pub bracket: String,
    pub taxable_amount: Decimal,
    pub rate: Decimal,
    /// Unrounded tax for this slice.
    pub tax: Decimal,
}

/// Result of a progressive (PPh21) calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    pub deductions: Decimal,

    /// `max(0, gross_income - deductions)`.
    pub taxable_income: Decimal,

    /// Rounded to whole rupiah.
    pub total_tax: Decimal,

    /// Rounded to whole rupiah.
    pub net_income: Decimal,

    /// Percentage (0-100), unrounded. Zero when there is no taxable income.
    pub effective_rate: Decimal,

    pub breakdown: Vec<BracketBreakdown>,
}

/// Result of a corporate income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxResult {
    pub revenue: Decimal,

    /// The entity tag exactly as supplied by the caller.
    pub legal_entity_type: String,

    /// Rate actually applied, as a fraction.
    pub tax_rate: Decimal,

    pub total_tax: Decimal,
    pub net_revenue: Decimal,
}
