// 🪙 Coin Record - Reference catalog entry
// Read-only catalog data: the filter engine never mutates these

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue type of a regular circulation coin
pub const REGULAR_ISSUE: &str = "Regular";

/// Issue type of a commemorative coin
pub const COMMEMORATIVE_ISSUE: &str = "Commemorative";

// ============================================================================
// CIRCULATION STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinStatus {
    /// Still minted / in active circulation
    Active,

    /// No longer minted
    Discontinued,
}

impl CoinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinStatus::Active => "active",
            CoinStatus::Discontinued => "discontinued",
        }
    }

    /// Label shown in selectors and detail panels
    pub fn label(&self) -> &'static str {
        match self {
            CoinStatus::Active => "Active Circulation",
            CoinStatus::Discontinued => "Discontinued",
        }
    }
}

impl fmt::Display for CoinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CoinStatus::Active),
            "discontinued" => Ok(CoinStatus::Discontinued),
            other => Err(format!("Unknown coin status: {}", other)),
        }
    }
}

// ============================================================================
// COIN RECORD
// ============================================================================

/// One reference coin in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    // ========================================================================
    // IDENTITY
    // ========================================================================
    /// Stable identifier, unique within a catalog
    pub id: String,

    // ========================================================================
    // FILTERABLE FIELDS
    // ========================================================================
    pub name: String,

    /// Currency-unit label, e.g. "₹10"
    pub denomination: String,

    pub mint_city: String,

    pub status: CoinStatus,

    /// "Regular" or "Commemorative" (see REGULAR_ISSUE / COMMEMORATIVE_ISSUE)
    pub issue_type: String,

    /// What the coin commemorates. Only commemorative issues carry one.
    #[serde(default, alias = "commemorative")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commemorative_note: Option<String>,

    // ========================================================================
    // DESCRIPTIVE FIELDS (detail view only)
    // ========================================================================
    pub year: i32,
    pub series: String,
    pub metal: String,

    /// Grams
    pub weight: f64,

    /// Millimetres
    pub diameter: f64,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,

    pub shape: String,
    pub edge_design: String,
    pub mint_mark: String,
    pub obverse_image: String,
    pub reverse_image: String,
    pub obverse_description: String,
    pub reverse_description: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_features: Option<String>,
}

impl CoinRecord {
    pub fn is_regular(&self) -> bool {
        self.issue_type == REGULAR_ISSUE
    }

    pub fn is_commemorative(&self) -> bool {
        self.issue_type == COMMEMORATIVE_ISSUE
    }

    /// Blank optional cells (CSV catalogs) become None
    pub(crate) fn normalize_optionals(&mut self) {
        for field in [&mut self.commemorative_note, &mut self.security_features] {
            if field.as_deref().map_or(false, |s| s.trim().is_empty()) {
                *field = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_coins;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [CoinStatus::Active, CoinStatus::Discontinued] {
            assert_eq!(status.as_str().parse::<CoinStatus>().unwrap(), status);
        }
        assert!("retired".parse::<CoinStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&CoinStatus::Discontinued).unwrap();
        assert_eq!(json, "\"discontinued\"");
    }

    #[test]
    fn test_issue_type_markers() {
        let coins = sample_coins();
        let gandhi = coins.iter().find(|c| c.id == "4").unwrap();
        assert!(gandhi.is_commemorative());
        assert!(!gandhi.is_regular());

        let ten = coins.iter().find(|c| c.id == "1").unwrap();
        assert!(ten.is_regular());
        assert!(ten.commemorative_note.is_none());
    }

    #[test]
    fn test_commemorative_alias_deserializes() {
        let mut coin = sample_coins().remove(3);
        coin.commemorative_note = None;
        let mut value = serde_json::to_value(&coin).unwrap();
        value["commemorative"] = serde_json::json!("Bapu");

        let parsed: CoinRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.commemorative_note.as_deref(), Some("Bapu"));
    }

    #[test]
    fn test_normalize_optionals_clears_blank_cells() {
        let mut coin = sample_coins().remove(0);
        coin.commemorative_note = Some("  ".to_string());
        coin.security_features = Some(String::new());

        coin.normalize_optionals();

        assert!(coin.commemorative_note.is_none());
        assert!(coin.security_features.is_none());
    }
}
