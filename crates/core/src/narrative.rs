//! Narrative rules
//!
//! Success factors, risk mitigations and implementation insights are picked
//! by fixed-order threshold checks over values the engine has already
//! computed. When a list comes out short, baseline entries are appended;
//! every list is then truncated to its cap. Identical inputs always produce
//! identical lists in identical order.
//!
//! The thresholds mirror the original calculator and have no empirical
//! basis of their own; keep them as they are unless new data says otherwise.

use crate::adjustments::{IndustryAdjustment, SizeAdjustment};
use crate::result::Narrative;
use crate::scenario::{Complexity, RiskLevel, ScenarioDefinition};

pub const MAX_SUCCESS_FACTORS: usize = 6;
pub const MAX_RISK_MITIGATIONS: usize = 5;
pub const MAX_IMPLEMENTATION_INSIGHTS: usize = 4;

const MIN_SUCCESS_FACTORS: usize = 3;
const MIN_RISK_MITIGATIONS: usize = 3;
const MIN_IMPLEMENTATION_INSIGHTS: usize = 2;

/// Adoption rate above which an industry counts as mature
pub const HIGH_ADOPTION_RATE: f64 = 75.0;
/// Adoption rate below which an industry counts as lagging
pub const LOW_ADOPTION_RATE: f64 = 65.0;
/// Resource availability above which an organization counts as well resourced
pub const HIGH_RESOURCE_AVAILABILITY: f64 = 85.0;
/// Resource availability below which an organization counts as constrained
pub const LOW_RESOURCE_AVAILABILITY: f64 = 70.0;
/// Payback at or below this many months counts as quick
pub const QUICK_PAYBACK_MONTHS: u32 = 12;

const FAST_IMPLEMENTATION_INDEX: f64 = 1.2;
const SLOW_IMPLEMENTATION_INDEX: f64 = 0.8;
const STRONG_ANNUALIZED_ROI: f64 = 100.0;

const BASELINE_SUCCESS_FACTORS: [&str; 3] = [
    "Clear business case with measurable goals",
    "Executive sponsorship",
    "Phased rollout plan",
];

const BASELINE_RISK_MITIGATIONS: [&str; 3] = [
    "Define success metrics before launch",
    "Hold regular progress reviews with stakeholders",
    "Keep a contingency reserve in the budget",
];

const BASELINE_INSIGHTS: [&str; 2] = [
    "Track realized returns against the projection every quarter",
    "Validate assumptions with a focused pilot before scaling",
];

/// Values the narrative rules look at
#[derive(Debug, Clone, Copy)]
pub struct NarrativeFacts<'a> {
    pub scenario: &'a ScenarioDefinition,
    /// Display name of the resolved industry
    pub industry_name: &'a str,
    pub industry: &'a IndustryAdjustment,
    pub size: &'a SizeAdjustment,
    pub adjusted_roi: f64,
    pub annualized_roi: f64,
    pub payback_months: Option<u32>,
    pub timeframe_months: u32,
}

/// Assemble all narrative lists
pub fn build(facts: &NarrativeFacts<'_>) -> Narrative {
    Narrative {
        benefits: facts.scenario.benefits.clone(),
        success_factors: success_factors(facts),
        risk_mitigations: risk_mitigations(facts),
        implementation_insights: implementation_insights(facts),
    }
}

pub fn success_factors(facts: &NarrativeFacts<'_>) -> Vec<String> {
    let mut factors = Vec::new();

    if facts
        .payback_months
        .is_some_and(|months| months <= QUICK_PAYBACK_MONTHS)
    {
        factors.push("Quick payback period".to_string());
    }
    if facts.industry.adoption_rate > HIGH_ADOPTION_RATE {
        factors.push("High industry adoption rate".to_string());
    }
    if facts.size.resource_availability > HIGH_RESOURCE_AVAILABILITY {
        factors.push("Strong organizational resources".to_string());
    }
    if facts.scenario.risk_level == RiskLevel::Low {
        factors.push("Low implementation risk".to_string());
    }
    if facts.adjusted_roi > facts.industry.avg_roi {
        factors.push("Projected ROI exceeds the industry benchmark".to_string());
    }
    if facts.size.implementation_speed_index >= FAST_IMPLEMENTATION_INDEX {
        factors.push("Fast implementation capability".to_string());
    }
    if facts.industry.complexity == Complexity::Low {
        factors.push("Low industry implementation complexity".to_string());
    }

    finish(factors, &BASELINE_SUCCESS_FACTORS, MIN_SUCCESS_FACTORS, MAX_SUCCESS_FACTORS)
}

pub fn risk_mitigations(facts: &NarrativeFacts<'_>) -> Vec<String> {
    let mut mitigations = Vec::new();

    if facts.scenario.risk_level == RiskLevel::High {
        mitigations.push("Run a pilot program before full rollout".to_string());
    }
    if facts.industry.complexity == Complexity::High {
        mitigations.push("Engage experienced implementation partners".to_string());
    }
    if facts.size.organizational_risk == RiskLevel::High {
        mitigations.push("Establish a dedicated change management team".to_string());
    }
    if facts.size.resource_availability < LOW_RESOURCE_AVAILABILITY {
        mitigations.push("Secure dedicated budget and staff before launch".to_string());
    }
    let beyond_horizon = facts
        .payback_months
        .map_or(true, |months| months > facts.timeframe_months);
    if beyond_horizon {
        mitigations.push("Set interim milestones to track value realization".to_string());
    }
    if facts.industry.adoption_rate < LOW_ADOPTION_RATE {
        mitigations.push("Benchmark against early adopters in adjacent industries".to_string());
    }

    finish(
        mitigations,
        &BASELINE_RISK_MITIGATIONS,
        MIN_RISK_MITIGATIONS,
        MAX_RISK_MITIGATIONS,
    )
}

pub fn implementation_insights(facts: &NarrativeFacts<'_>) -> Vec<String> {
    let mut insights = Vec::new();

    insights.push(match facts.payback_months {
        Some(months) if months <= facts.timeframe_months => {
            format!("Expected to recover the investment in {} months", months)
        }
        Some(months) => format!(
            "Payback of {} months extends beyond the {}-month projection",
            months, facts.timeframe_months
        ),
        None => "Returns do not recover the investment under current assumptions".to_string(),
    });

    let speed = facts.size.implementation_speed_index;
    if speed >= FAST_IMPLEMENTATION_INDEX {
        insights.push("Organizations of this size typically implement quickly".to_string());
    } else if speed <= SLOW_IMPLEMENTATION_INDEX {
        insights.push("Plan for a longer implementation timeline at this organization size".to_string());
    }

    insights.push(format!(
        "{:.0}% of organizations in {} have adopted similar solutions",
        facts.industry.adoption_rate, facts.industry_name
    ));

    let gap = facts.adjusted_roi - facts.industry.avg_roi;
    if gap.abs() < 0.5 {
        insights.push("Projected ROI is in line with the industry benchmark".to_string());
    } else if gap > 0.0 {
        insights.push(format!(
            "Projected ROI is {:.0} points above the industry benchmark",
            gap
        ));
    } else {
        insights.push(format!(
            "Projected ROI is {:.0} points below the industry benchmark",
            -gap
        ));
    }

    if facts.annualized_roi > STRONG_ANNUALIZED_ROI {
        insights.push("Annualized ROI above 100% indicates strong value creation".to_string());
    }
    if facts.industry.complexity == Complexity::High {
        insights.push("Budget extra time for integration and training".to_string());
    }

    finish(
        insights,
        &BASELINE_INSIGHTS,
        MIN_IMPLEMENTATION_INSIGHTS,
        MAX_IMPLEMENTATION_INSIGHTS,
    )
}

fn finish(mut items: Vec<String>, baseline: &[&str], min: usize, max: usize) -> Vec<String> {
    for entry in baseline {
        if items.len() >= min {
            break;
        }
        if !items.iter().any(|item| item == entry) {
            items.push((*entry).to_string());
        }
    }
    items.truncate(max);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::scenario;

    fn industry(adoption: f64, avg_roi: f64, complexity: Complexity) -> IndustryAdjustment {
        IndustryAdjustment {
            display_name: "Technology".to_string(),
            multiplier: 1.0,
            adoption_rate: adoption,
            avg_roi,
            complexity,
        }
    }

    fn size(resources: f64, speed: f64, risk: RiskLevel) -> SizeAdjustment {
        SizeAdjustment {
            display_name: "Medium".to_string(),
            multiplier: 1.0,
            resource_availability: resources,
            implementation_speed_index: speed,
            organizational_risk: risk,
        }
    }

    #[test]
    fn test_strong_case_hits_success_factor_cap() {
        let scenario = scenario("ai-chatbot", "automation", 160.0, 200.0, RiskLevel::Low);
        let industry = industry(90.0, 150.0, Complexity::Low);
        let size = size(92.0, 1.5, RiskLevel::Low);
        let facts = NarrativeFacts {
            scenario: &scenario,
            industry_name: "Technology",
            industry: &industry,
            size: &size,
            adjusted_roi: 225.0,
            annualized_roi: 225.0,
            payback_months: Some(6),
            timeframe_months: 12,
        };

        let factors = success_factors(&facts);
        assert_eq!(factors.len(), MAX_SUCCESS_FACTORS);
        assert_eq!(factors[0], "Quick payback period");
        assert_eq!(factors[1], "High industry adoption rate");
        // Seventh condition also holds but falls off the cap
        assert!(!factors.contains(&"Low industry implementation complexity".to_string()));
    }

    #[test]
    fn test_weak_case_gets_baseline_entries() {
        let scenario = scenario("erp", "operations", 20.0, 40.0, RiskLevel::High);
        let industry = industry(55.0, 120.0, Complexity::High);
        let size = size(60.0, 0.7, RiskLevel::High);
        let facts = NarrativeFacts {
            scenario: &scenario,
            industry_name: "Government",
            industry: &industry,
            size: &size,
            adjusted_roi: 25.0,
            annualized_roi: 12.5,
            payback_months: Some(48),
            timeframe_months: 24,
        };

        let factors = success_factors(&facts);
        assert_eq!(
            factors,
            BASELINE_SUCCESS_FACTORS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        );

        let mitigations = risk_mitigations(&facts);
        assert_eq!(mitigations.len(), MAX_RISK_MITIGATIONS);
        assert_eq!(mitigations[0], "Run a pilot program before full rollout");

        let insights = implementation_insights(&facts);
        assert_eq!(insights.len(), MAX_IMPLEMENTATION_INSIGHTS);
        assert_eq!(
            insights[0],
            "Payback of 48 months extends beyond the 24-month projection"
        );
        assert_eq!(
            insights[1],
            "Plan for a longer implementation timeline at this organization size"
        );
    }

    #[test]
    fn test_unrecoverable_payback_insight() {
        let scenario = scenario("bad", "ops", -20.0, -10.0, RiskLevel::Medium);
        let industry = industry(70.0, 100.0, Complexity::Medium);
        let size = size(75.0, 1.0, RiskLevel::Medium);
        let facts = NarrativeFacts {
            scenario: &scenario,
            industry_name: "Retail",
            industry: &industry,
            size: &size,
            adjusted_roi: -15.0,
            annualized_roi: -15.0,
            payback_months: None,
            timeframe_months: 12,
        };

        let insights = implementation_insights(&facts);
        assert_eq!(
            insights[0],
            "Returns do not recover the investment under current assumptions"
        );
        assert_eq!(
            insights[1],
            "70% of organizations in Retail have adopted similar solutions"
        );
        assert!(risk_mitigations(&facts)
            .contains(&"Set interim milestones to track value realization".to_string()));
    }

    #[test]
    fn test_finish_skips_duplicates_and_truncates() {
        let items = vec!["Executive sponsorship".to_string()];
        let out = finish(items, &BASELINE_SUCCESS_FACTORS, 3, 6);
        assert_eq!(
            out,
            vec![
                "Executive sponsorship".to_string(),
                "Clear business case with measurable goals".to_string(),
                "Phased rollout plan".to_string(),
            ]
        );

        let many: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        assert_eq!(finish(many, &[], 0, 4).len(), 4);
    }
}
