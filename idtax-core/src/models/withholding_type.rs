use serde::{Deserialize, Serialize};

/// Payment types subject to PPh23 withholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithholdingType {
    Dividend,
    Interest,
    Royalty,
    Service,
}

impl WithholdingType {
    pub const ALL: [WithholdingType; 4] = [
        Self::Dividend,
        Self::Interest,
        Self::Royalty,
        Self::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dividend => "dividend",
            Self::Interest => "interest",
            Self::Royalty => "royalty",
            Self::Service => "service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dividend" => Some(Self::Dividend),
            "interest" => Some(Self::Interest),
            "royalty" => Some(Self::Royalty),
            "service" => Some(Self::Service),
            _ => None,
        }
    }
}

impl std::fmt::Display for WithholdingType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
