//! Scenario definitions
//!
//! A scenario is one investment opportunity from the static catalog
//! (e.g. "AI customer service chatbot"). Scenarios are created when the
//! catalog is loaded and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-step level used for scenario risk and organizational risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown risk level '{}'", other)),
        }
    }
}

/// Implementation complexity label attached to an industry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed numeric interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Both ends finite and `min < max`
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Static scenario record from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDefinition {
    /// Unique catalog key
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Grouping used by the catalog browser
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Expected ROI range in percent
    #[serde(rename = "expectedROI")]
    pub expected_roi: Bounds,
    pub risk_level: RiskLevel,
    /// Suggested investment range in USD
    pub cost_range: Bounds,
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Suggested projection horizon in months
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe_months: Option<u32>,
}

impl ScenarioDefinition {
    /// Base ROI: midpoint of the expected range
    pub fn base_roi(&self) -> f64 {
        self.expected_roi.midpoint()
    }
}
