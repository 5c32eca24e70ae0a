//! Adjustment tables
//!
//! Multiplicative factors and descriptive metadata keyed by industry,
//! company size and scenario risk level. Tables are loaded once from the
//! catalog and passed to the engine explicitly.
//!
//! Unknown industry or size keys resolve to the table's configured default
//! key, and if that is also absent, to a built-in neutral entry
//! (multiplier 1.0). The closed set of keys offered to users always
//! resolves; the fallback only covers partial data.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::scenario::{Complexity, RiskLevel};

/// Key substituted for unknown industries
pub const DEFAULT_INDUSTRY_KEY: &str = "technology";
/// Key substituted for unknown company sizes
pub const DEFAULT_COMPANY_SIZE_KEY: &str = "medium";

/// Per-industry adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryAdjustment {
    #[serde(default)]
    pub display_name: String,
    pub multiplier: f64,
    /// Share of organizations in the industry using similar solutions (0..100)
    pub adoption_rate: f64,
    /// Industry benchmark ROI in percent
    #[serde(rename = "avgROI")]
    pub avg_roi: f64,
    pub complexity: Complexity,
}

impl IndustryAdjustment {
    /// Built-in neutral entry
    pub fn neutral() -> Self {
        Self {
            display_name: "General".to_string(),
            multiplier: 1.0,
            adoption_rate: 70.0,
            avg_roi: 150.0,
            complexity: Complexity::Medium,
        }
    }
}

/// Per-company-size adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeAdjustment {
    #[serde(default)]
    pub display_name: String,
    pub multiplier: f64,
    /// Availability of budget and staff (0..100)
    pub resource_availability: f64,
    /// Relative implementation speed, 1.0 = typical
    pub implementation_speed_index: f64,
    pub organizational_risk: RiskLevel,
}

impl SizeAdjustment {
    /// Built-in neutral entry
    pub fn neutral() -> Self {
        Self {
            display_name: "Typical organization".to_string(),
            multiplier: 1.0,
            resource_availability: 75.0,
            implementation_speed_index: 1.0,
            organizational_risk: RiskLevel::Medium,
        }
    }
}

/// Per-risk-level adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAdjustment {
    pub multiplier: f64,
    /// Confidence in the projection (0..100)
    pub confidence: f64,
    /// Added to the base success rate, may be negative
    pub success_rate_bonus: i32,
}

/// One risk entry per level; the set of levels is closed so lookup is total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustments {
    pub low: RiskAdjustment,
    pub medium: RiskAdjustment,
    pub high: RiskAdjustment,
}

impl RiskAdjustments {
    pub fn get(&self, level: RiskLevel) -> &RiskAdjustment {
        match level {
            RiskLevel::Low => &self.low,
            RiskLevel::Medium => &self.medium,
            RiskLevel::High => &self.high,
        }
    }
}

/// Outcome of a table lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a, T: Clone> {
    /// Key of the entry actually used
    pub key: Cow<'a, str>,
    pub entry: Cow<'a, T>,
    /// True when the requested key was absent
    pub fallback: bool,
}

/// All adjustment tables used by a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentTables {
    pub industries: BTreeMap<String, IndustryAdjustment>,
    pub company_sizes: BTreeMap<String, SizeAdjustment>,
    pub risk_levels: RiskAdjustments,
    #[serde(default = "default_industry_key")]
    pub default_industry: String,
    #[serde(default = "default_company_size_key")]
    pub default_company_size: String,
}

fn default_industry_key() -> String {
    DEFAULT_INDUSTRY_KEY.to_string()
}

fn default_company_size_key() -> String {
    DEFAULT_COMPANY_SIZE_KEY.to_string()
}

impl AdjustmentTables {
    /// Look up an industry entry, falling back to the default
    pub fn industry<'a>(&'a self, key: &str) -> Resolved<'a, IndustryAdjustment> {
        resolve(
            &self.industries,
            key,
            &self.default_industry,
            IndustryAdjustment::neutral,
        )
    }

    /// Look up a company-size entry, falling back to the default
    pub fn company_size<'a>(&'a self, key: &str) -> Resolved<'a, SizeAdjustment> {
        resolve(
            &self.company_sizes,
            key,
            &self.default_company_size,
            SizeAdjustment::neutral,
        )
    }

    pub fn risk(&self, level: RiskLevel) -> &RiskAdjustment {
        self.risk_levels.get(level)
    }
}

fn resolve<'a, T: Clone>(
    table: &'a BTreeMap<String, T>,
    key: &str,
    default_key: &'a str,
    neutral: fn() -> T,
) -> Resolved<'a, T> {
    let normalized = key.trim().to_ascii_lowercase();
    if let Some((k, entry)) = table.get_key_value(normalized.as_str()) {
        return Resolved {
            key: Cow::Borrowed(k.as_str()),
            entry: Cow::Borrowed(entry),
            fallback: false,
        };
    }

    match table.get_key_value(default_key) {
        Some((k, entry)) => Resolved {
            key: Cow::Borrowed(k.as_str()),
            entry: Cow::Borrowed(entry),
            fallback: true,
        },
        None => Resolved {
            key: Cow::Borrowed("neutral"),
            entry: Cow::Owned(neutral()),
            fallback: true,
        },
    }
}
