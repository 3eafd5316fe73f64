use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the monthly effective-rate (TER) table.
///
/// Both bounds are inclusive; `max_income: None` means the band is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRateBand {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl MonthlyRateBand {
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income <= max)
    }
}
