//! Calculation result record
//!
//! Serializes directly to the JSON shape returned by the API. Number
//! formatting and localization belong to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::scenario::{Complexity, RiskLevel};

/// Financial projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProjection {
    pub investment: f64,
    pub expected_returns: f64,
    /// Always `investment + expected_returns`
    pub total_value: f64,
    pub roi_percentage: f64,
    #[serde(rename = "annualizedROI")]
    pub annualized_roi: f64,
    /// `None` when the investment is not recoverable
    pub payback_period_months: Option<u32>,
    pub monthly_return: f64,
}

impl FinancialProjection {
    pub fn is_recoverable(&self) -> bool {
        self.payback_period_months.is_some()
    }
}

/// Qualitative assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitativeAssessment {
    /// Clamped to 50..=95
    pub success_rate_percent: u8,
    pub confidence_percent: f64,
    pub risk_level: RiskLevel,
}

/// Industry and organization context for the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionContext {
    #[serde(rename = "industryBenchmarkROI")]
    pub industry_benchmark_roi: f64,
    pub industry_adoption_rate: f64,
    pub complexity_label: Complexity,
    pub resource_availability: f64,
    pub implementation_speed_index: f64,
    pub organizational_risk: RiskLevel,
}

/// Narrative lists rendered alongside the numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub benefits: Vec<String>,
    pub success_factors: Vec<String>,
    pub risk_mitigations: Vec<String>,
    pub implementation_insights: Vec<String>,
}

/// Table entries and factors applied to the base ROI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedAdjustments {
    #[serde(rename = "baseROI")]
    pub base_roi: f64,
    pub industry: String,
    pub industry_multiplier: f64,
    pub industry_fallback: bool,
    pub company_size: String,
    pub size_multiplier: f64,
    pub size_fallback: bool,
    pub risk_multiplier: f64,
}

/// Complete engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub scenario_id: String,
    pub currency: String,
    pub timeframe_months: u32,
    pub financial: FinancialProjection,
    pub qualitative: QualitativeAssessment,
    pub context: ProjectionContext,
    pub narrative: Narrative,
    pub adjustments: AppliedAdjustments,
}
