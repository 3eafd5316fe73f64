use serde::{Deserialize, Serialize};

/// Registered legal form of a client business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalEntityType {
    /// Perseroan Terbatas (limited liability company).
    #[serde(rename = "PT")]
    Pt,
    /// Foreign-investment limited liability company.
    #[serde(rename = "PT_PMA")]
    PtPma,
    /// Commanditaire Vennootschap (limited partnership).
    #[serde(rename = "CV")]
    Cv,
    #[serde(rename = "FIRMA")]
    Firma,
    /// Usaha Dagang (sole trading business).
    #[serde(rename = "UD")]
    Ud,
    /// Individual taxpayer.
    #[serde(rename = "PERORANGAN")]
    Perorangan,
}

/// How an entity's annual revenue is taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTaxRule {
    /// Reduced small-business rate below the revenue threshold, standard
    /// corporate rate at or above it.
    SmallBusinessThreshold,
    /// Revenue is run through the personal progressive schedule.
    Progressive,
    /// Standard corporate rate regardless of revenue.
    StandardFlat,
}

impl LegalEntityType {
    pub const ALL: [LegalEntityType; 6] = [
        Self::Pt,
        Self::PtPma,
        Self::Cv,
        Self::Firma,
        Self::Ud,
        Self::Perorangan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pt => "PT",
            Self::PtPma => "PT_PMA",
            Self::Cv => "CV",
            Self::Firma => "FIRMA",
            Self::Ud => "UD",
            Self::Perorangan => "PERORANGAN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PT" => Some(Self::Pt),
            "PT_PMA" => Some(Self::PtPma),
            "CV" => Some(Self::Cv),
            "FIRMA" => Some(Self::Firma),
            "UD" => Some(Self::Ud),
            "PERORANGAN" => Some(Self::Perorangan),
            _ => None,
        }
    }

    pub fn tax_rule(&self) -> EntityTaxRule {
        match self {
            Self::Pt | Self::PtPma => EntityTaxRule::SmallBusinessThreshold,
            Self::Cv | Self::Firma | Self::Ud | Self::Perorangan => EntityTaxRule::Progressive,
        }
    }
}

impl EntityTaxRule {
    /// Resolves the rule for a raw entity tag. Unrecognized tags are taxed at
    /// the standard corporate rate.
    pub fn for_tag(tag: &str) -> Self {
        LegalEntityType::parse(tag)
            .map(|entity| entity.tax_rule())
            .unwrap_or(Self::StandardFlat)
    }
}

impl std::fmt::Display for LegalEntityType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_tag() {
        for entity in LegalEntityType::ALL {
            assert_eq!(LegalEntityType::parse(entity.as_str()), Some(entity));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(LegalEntityType::parse("pt"), None);
        assert_eq!(LegalEntityType::parse("Pt_Pma"), None);
    }

    #[test]
    fn corporations_use_threshold_rule() {
        assert_eq!(LegalEntityType::Pt.tax_rule(), EntityTaxRule::SmallBusinessThreshold);
        assert_eq!(LegalEntityType::PtPma.tax_rule(), EntityTaxRule::SmallBusinessThreshold);
    }

    #[test]
    fn partnerships_and_individuals_are_progressive() {
        for entity in [
            LegalEntityType::Cv,
            LegalEntityType::Firma,
            LegalEntityType::Ud,
            LegalEntityType::Perorangan,
        ] {
            assert_eq!(entity.tax_rule(), EntityTaxRule::Progressive);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_standard_flat() {
        assert_eq!(EntityTaxRule::for_tag("KOPERASI"), EntityTaxRule::StandardFlat);
        assert_eq!(EntityTaxRule::for_tag(""), EntityTaxRule::StandardFlat);
    }

    #[test]
    fn serde_uses_registry_tags() {
        let json = serde_json::to_string(&LegalEntityType::PtPma).unwrap();

        assert_eq!(json, "\"PT_PMA\"");
    }
}
