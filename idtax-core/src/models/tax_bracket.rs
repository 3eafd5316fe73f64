use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a progressive schedule.
///
/// The lower bound is implicit: it is the previous bracket's `max_income`,
/// or zero for the first bracket. `None` marks the unbounded top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// Width of this bracket given the previous bracket's upper bound.
    ///
    /// Returns `None` for the unbounded bracket.
    pub fn width(
        &self,
        previous_max: Decimal,
    ) -> Option<Decimal> {
        self.max_income.map(|max| max - previous_max)
    }
}
