//! Corporate income tax by legal entity type.
//!
//! | Entity                        | Rule |
//! |-------------------------------|------|
//! | PT, PT_PMA                    | 11% below Rp 4.8 billion revenue, 22% otherwise |
//! | CV, FIRMA, UD, PERORANGAN     | Personal progressive schedule on full revenue |
//! | anything else                 | 22% flat |
//!
//! The progressive branch taxes gross revenue with no deduction for business
//! expenses, so it overstates the liability of a partnership with real costs.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::TaxCalculator;
use crate::calculations::common::round_whole;
use crate::models::{CorporateTaxResult, EntityTaxRule, LegalEntityType};

impl TaxCalculator<'_> {
    /// Calculates annual income tax for an entity identified by its raw tag.
    ///
    /// Unrecognised tags are taxed at the standard corporate rate rather than
    /// rejected. The tag is echoed back unchanged in the result.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use idtax_core::calculations::TaxCalculator;
    ///
    /// let calculator = TaxCalculator::default();
    ///
    /// let small = calculator.calculate_corporate_tax("PT", dec!(4000000000));
    /// assert_eq!(small.tax_rate, dec!(0.11));
    /// assert_eq!(small.total_tax, dec!(440000000));
    ///
    /// let large = calculator.calculate_corporate_tax("PT", dec!(5000000000));
    /// assert_eq!(large.tax_rate, dec!(0.22));
    /// assert_eq!(large.total_tax, dec!(1100000000));
    /// ```
    pub fn calculate_corporate_tax(
        &self,
        legal_entity_type: &str,
        annual_revenue: Decimal,
    ) -> CorporateTaxResult {
        let rule = EntityTaxRule::for_tag(legal_entity_type);
        if rule == EntityTaxRule::StandardFlat {
            warn!(
                legal_entity_type,
                "Unrecognised legal entity type; applying standard corporate rate"
            );
        }

        self.corporate_tax_with_rule(rule, legal_entity_type, annual_revenue)
    }

    /// Calculates annual income tax for a known legal entity type.
    pub fn calculate_corporate_tax_for(
        &self,
        legal_entity_type: LegalEntityType,
        annual_revenue: Decimal,
    ) -> CorporateTaxResult {
        self.corporate_tax_with_rule(
            legal_entity_type.tax_rule(),
            legal_entity_type.as_str(),
            annual_revenue,
        )
    }

    fn corporate_tax_with_rule(
        &self,
        rule: EntityTaxRule,
        legal_entity_type: &str,
        annual_revenue: Decimal,
    ) -> CorporateTaxResult {
        if annual_revenue < Decimal::ZERO {
            warn!(
                legal_entity_type,
                annual_revenue = %annual_revenue,
                "Negative revenue passed to corporate calculation"
            );
        }

        let result = match rule {
            EntityTaxRule::SmallBusinessThreshold => {
                let rate = self.threshold_rate(annual_revenue);
                self.flat_corporate_tax(legal_entity_type, annual_revenue, rate)
            }
            EntityTaxRule::Progressive => {
                self.progressive_corporate_tax(legal_entity_type, annual_revenue)
            }
            EntityTaxRule::StandardFlat => {
                self.flat_corporate_tax(legal_entity_type, annual_revenue, self.rules.corporate_rate)
            }
        };

        debug!(
            legal_entity_type,
            rule = ?rule,
            tax_rate = %result.tax_rate,
            total_tax = %result.total_tax,
            "Corporate tax calculated"
        );

        result
    }

    /// Reduced rate strictly below the threshold, standard rate at or above it.
    fn threshold_rate(
        &self,
        annual_revenue: Decimal,
    ) -> Decimal {
        if annual_revenue < self.rules.small_business_threshold {
            self.rules.small_business_rate
        } else {
            self.rules.corporate_rate
        }
    }

    fn flat_corporate_tax(
        &self,
        legal_entity_type: &str,
        annual_revenue: Decimal,
        tax_rate: Decimal,
    ) -> CorporateTaxResult {
        let total_tax = round_whole(annual_revenue * tax_rate);

        CorporateTaxResult {
            revenue: annual_revenue,
            legal_entity_type: legal_entity_type.to_string(),
            tax_rate,
            total_tax,
            net_revenue: annual_revenue - total_tax,
        }
    }

    fn progressive_corporate_tax(
        &self,
        legal_entity_type: &str,
        annual_revenue: Decimal,
    ) -> CorporateTaxResult {
        let personal = self.calculate_personal_tax(annual_revenue, Decimal::ZERO);

        CorporateTaxResult {
            revenue: annual_revenue,
            legal_entity_type: legal_entity_type.to_string(),
            tax_rate: personal.effective_rate / Decimal::ONE_HUNDRED,
            total_tax: personal.total_tax,
            net_revenue: personal.net_income,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn calculator() -> TaxCalculator<'static> {
        TaxCalculator::default()
    }

    // =========================================================================
    // threshold_rate tests
    // =========================================================================

    #[test]
    fn threshold_rate_below_threshold_is_reduced() {
        assert_eq!(calculator().threshold_rate(dec!(4799999999)), dec!(0.11));
    }

    #[test]
    fn threshold_rate_at_threshold_is_standard() {
        assert_eq!(calculator().threshold_rate(dec!(4800000000)), dec!(0.22));
    }

    // =========================================================================
    // calculate_corporate_tax tests
    // =========================================================================

    #[test]
    fn pt_below_threshold_uses_small_business_rate() {
        let result = calculator().calculate_corporate_tax("PT", dec!(4000000000));

        assert_eq!(
            result,
            CorporateTaxResult {
                revenue: dec!(4000000000),
                legal_entity_type: "PT".to_string(),
                tax_rate: dec!(0.11),
                total_tax: dec!(440000000),
                net_revenue: dec!(3560000000),
            }
        );
    }

    #[test]
    fn pt_above_threshold_uses_standard_rate() {
        let result = calculator().calculate_corporate_tax("PT", dec!(5000000000));

        assert_eq!(result.tax_rate, dec!(0.22));
        assert_eq!(result.total_tax, dec!(1100000000));
        assert_eq!(result.net_revenue, dec!(3900000000));
    }

    #[test]
    fn pt_exactly_at_threshold_uses_standard_rate() {
        let result = calculator().calculate_corporate_tax("PT", dec!(4800000000));

        assert_eq!(result.tax_rate, dec!(0.22));
        assert_eq!(result.total_tax, dec!(1056000000));
    }

    #[test]
    fn pt_pma_follows_threshold_rule() {
        let result = calculator().calculate_corporate_tax("PT_PMA", dec!(1000000000));

        assert_eq!(result.tax_rate, dec!(0.11));
        assert_eq!(result.legal_entity_type, "PT_PMA");
    }

    #[test]
    fn partnership_delegates_to_progressive_schedule() {
        let result = calculator().calculate_corporate_tax("CV", dec!(100000000));

        assert_eq!(result.total_tax, dec!(9000000));
        assert_eq!(result.net_revenue, dec!(91000000));
        assert_eq!(result.tax_rate, dec!(0.09));
    }

    // Known approximation: partnership revenue is taxed gross, with no
    // deduction for business expenses.
    #[test]
    fn progressive_entities_are_taxed_on_gross_revenue() {
        for tag in ["CV", "FIRMA", "UD", "PERORANGAN"] {
            let corporate = calculator().calculate_corporate_tax(tag, dec!(300000000));
            let personal = calculator().calculate_personal_tax(dec!(300000000), Decimal::ZERO);

            assert_eq!(corporate.total_tax, personal.total_tax, "tag {tag}");
            assert_eq!(corporate.net_revenue, personal.net_income, "tag {tag}");
            assert_eq!(corporate.legal_entity_type, tag);
        }
    }

    #[test]
    fn progressive_entity_with_zero_revenue() {
        let result = calculator().calculate_corporate_tax("UD", Decimal::ZERO);

        assert_eq!(result.tax_rate, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.net_revenue, Decimal::ZERO);
    }

    #[test]
    fn unknown_entity_falls_back_to_standard_rate() {
        let result = calculator().calculate_corporate_tax("KOPERASI", dec!(1000000000));

        assert_eq!(result.tax_rate, dec!(0.22));
        assert_eq!(result.total_tax, dec!(220000000));
        assert_eq!(result.legal_entity_type, "KOPERASI");
    }

    #[test]
    fn unknown_entity_ignores_small_business_threshold() {
        let result = calculator().calculate_corporate_tax("pt", dec!(1000));

        assert_eq!(result.tax_rate, dec!(0.22));
    }

    #[test]
    fn flat_tax_rounds_total_and_derives_net() {
        // 1,001 × 11% = 110.11
        let result = calculator().calculate_corporate_tax("PT", dec!(1001));

        assert_eq!(result.total_tax, dec!(110));
        assert_eq!(result.net_revenue, dec!(891));
    }

    // =========================================================================
    // calculate_corporate_tax_for tests
    // =========================================================================

    #[test]
    fn typed_variant_matches_tagged_variant() {
        for entity in LegalEntityType::ALL {
            let typed = calculator().calculate_corporate_tax_for(entity, dec!(2500000000));
            let tagged = calculator().calculate_corporate_tax(entity.as_str(), dec!(2500000000));

            assert_eq!(typed, tagged);
        }
    }
}
