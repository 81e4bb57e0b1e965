//! Enum types for KPI definitions.
//!
//! Enums serialize as their lowercase string form and accept any other
//! string through a `Custom(String)` fallback, so user-defined categories
//! survive a round trip.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Display grouping for a KPI. Has no effect on evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Liquidity,
    Efficiency,
    Profitability,
    Leverage,
    Valuation,
    Growth,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Liquidity => "liquidity",
            Self::Efficiency => "efficiency",
            Self::Profitability => "profitability",
            Self::Leverage => "leverage",
            Self::Valuation => "valuation",
            Self::Growth => "growth",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Parses a category leniently: trims and lowercases before matching
    /// the known variants. Unknown names are kept verbatim (trimmed).
    pub fn parse_lenient(s: &str) -> Self {
        let trimmed = s.trim();
        match Self::from(trimmed.to_ascii_lowercase().as_str()) {
            Self::Custom(_) => Self::Custom(trimmed.to_owned()),
            known => known,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match on the lowercase names; anything else becomes `Custom`.
impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "liquidity" => Self::Liquidity,
            "efficiency" => Self::Efficiency,
            "profitability" => Self::Profitability,
            "leverage" => Self::Leverage,
            "valuation" => Self::Valuation,
            "growth" => Self::Growth,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_as_str() {
        assert_eq!(Category::Liquidity.as_str(), "liquidity");
        assert_eq!(Category::Profitability.to_string(), "profitability");
    }

    #[test]
    fn category_serde_known() {
        let json = serde_json::to_string(&Category::Efficiency).unwrap();
        assert_eq!(json, r#""efficiency""#);
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Efficiency);
    }

    #[test]
    fn category_custom_roundtrip() {
        let json = r#""esg""#;
        let c: Category = serde_json::from_str(json).unwrap();
        assert_eq!(c, Category::Custom("esg".into()));
        assert_eq!(serde_json::to_string(&c).unwrap(), json);
    }

    #[test]
    fn category_lenient_parse() {
        assert_eq!(Category::parse_lenient("  Liquidity "), Category::Liquidity);
        assert_eq!(
            Category::parse_lenient(" Cash Conversion "),
            Category::Custom("Cash Conversion".into())
        );
    }

    #[test]
    fn category_from_is_case_sensitive() {
        assert_eq!(Category::from("growth"), Category::Growth);
        assert_eq!(Category::from("Growth"), Category::Custom("Growth".into()));
        assert_eq!(Category::default(), Category::Liquidity);
    }
}
