mod legal_entity_type;
mod monthly_rate_band;
mod tax_bracket;
mod tax_result;
mod withholding_type;

pub use legal_entity_type::{EntityTaxRule, LegalEntityType};
pub use monthly_rate_band::MonthlyRateBand;
pub use tax_bracket::TaxBracket;
pub use tax_result::{BracketBreakdown, CorporateTaxResult, TaxResult};
pub use withholding_type::WithholdingType;
