//! Engine-wide properties checked over a sweep of scenarios and inputs

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use catalyst_core::narrative::{
    MAX_IMPLEMENTATION_INSIGHTS, MAX_RISK_MITIGATIONS, MAX_SUCCESS_FACTORS,
};
use catalyst_core::{
    compute, AdjustmentTables, Bounds, CalculationInput, Complexity, IndustryAdjustment,
    RiskAdjustment, RiskAdjustments, RiskLevel, ScenarioDefinition, SizeAdjustment,
};

fn industry(multiplier: f64, adoption: f64, avg_roi: f64, complexity: Complexity) -> IndustryAdjustment {
    IndustryAdjustment {
        display_name: String::new(),
        multiplier,
        adoption_rate: adoption,
        avg_roi,
        complexity,
    }
}

fn size(multiplier: f64, resources: f64, speed: f64, risk: RiskLevel) -> SizeAdjustment {
    SizeAdjustment {
        display_name: String::new(),
        multiplier,
        resource_availability: resources,
        implementation_speed_index: speed,
        organizational_risk: risk,
    }
}

fn risk(multiplier: f64, confidence: f64, bonus: i32) -> RiskAdjustment {
    RiskAdjustment {
        multiplier,
        confidence,
        success_rate_bonus: bonus,
    }
}

fn tables() -> AdjustmentTables {
    let industries = BTreeMap::from([
        ("technology".to_string(), industry(1.25, 85.0, 210.0, Complexity::Medium)),
        ("healthcare".to_string(), industry(1.1, 68.0, 170.0, Complexity::High)),
        ("retail".to_string(), industry(1.05, 72.0, 160.0, Complexity::Low)),
        ("government".to_string(), industry(0.8, 55.0, 110.0, Complexity::High)),
    ]);
    let company_sizes = BTreeMap::from([
        ("startup".to_string(), size(0.9, 60.0, 1.4, RiskLevel::High)),
        ("medium".to_string(), size(1.0, 80.0, 1.0, RiskLevel::Medium)),
        ("enterprise".to_string(), size(1.15, 92.0, 0.7, RiskLevel::Low)),
    ]);
    AdjustmentTables {
        industries,
        company_sizes,
        risk_levels: RiskAdjustments {
            low: risk(1.0, 90.0, 10),
            medium: risk(0.95, 75.0, 0),
            high: risk(0.85, 60.0, -10),
        },
        default_industry: "technology".to_string(),
        default_company_size: "medium".to_string(),
    }
}

fn scenario(id: &str, min: f64, max: f64, risk_level: RiskLevel) -> ScenarioDefinition {
    ScenarioDefinition {
        id: id.to_string(),
        name: id.to_string(),
        category: "test".to_string(),
        description: String::new(),
        expected_roi: Bounds::new(min, max),
        risk_level,
        cost_range: Bounds::new(5_000.0, 250_000.0),
        benefits: vec!["Faster response times".to_string(), "Lower costs".to_string()],
        timeframe_months: None,
    }
}

fn input(investment: f64, timeframe: u32, industry: &str, company_size: &str) -> CalculationInput {
    CalculationInput {
        investment,
        timeframe_months: NonZeroU32::new(timeframe).unwrap(),
        industry: industry.to_string(),
        company_size: company_size.to_string(),
        currency: "USD".to_string(),
        scenario_id: "sweep".to_string(),
    }
}

fn scenarios() -> Vec<ScenarioDefinition> {
    vec![
        scenario("ai-chatbot", 160.0, 200.0, RiskLevel::Low),
        scenario("crm-upgrade", 90.0, 140.0, RiskLevel::Medium),
        scenario("blockchain-supply", 40.0, 300.0, RiskLevel::High),
        scenario("small-win", 5.0, 15.0, RiskLevel::Low),
        scenario("money-pit", -40.0, -5.0, RiskLevel::High),
    ]
}

fn sweep() -> Vec<(ScenarioDefinition, CalculationInput)> {
    let mut cases = Vec::new();
    for s in scenarios() {
        for industry in ["technology", "healthcare", "retail", "government", "unknown"] {
            for size in ["startup", "medium", "enterprise", "unknown"] {
                for (investment, timeframe) in [(1_000.0, 1), (25_000.0, 12), (333_333.0, 7), (2_500_000.0, 60)] {
                    cases.push((s.clone(), input(investment, timeframe, industry, size)));
                }
            }
        }
    }
    cases
}

#[test]
fn chatbot_projection_for_technology_company() {
    let tables = tables();
    let s = scenario("ai-chatbot", 160.0, 200.0, RiskLevel::Low);
    let result = compute(&s, &input(25_000.0, 12, "technology", "medium"), &tables);

    assert_eq!(result.financial.roi_percentage, 225.0);
    assert_eq!(result.financial.expected_returns, 56_250.0);
    assert_eq!(result.financial.total_value, 81_250.0);
    assert_eq!(result.financial.monthly_return, 4688.0);
    assert_eq!(result.financial.payback_period_months, Some(6));
    assert_eq!(result.financial.annualized_roi, 225.0);
    assert_eq!(result.narrative.benefits, s.benefits);
}

#[test]
fn results_are_deterministic() {
    let tables = tables();
    for (s, i) in sweep() {
        let first = serde_json::to_string(&compute(&s, &i, &tables)).unwrap();
        let second = serde_json::to_string(&compute(&s, &i, &tables)).unwrap();
        assert_eq!(first, second, "non-deterministic result for {} / {:?}", s.id, i);
    }
}

#[test]
fn total_value_is_investment_plus_returns() {
    let tables = tables();
    for (s, i) in sweep() {
        let f = compute(&s, &i, &tables).financial;
        assert_eq!(f.total_value, f.investment + f.expected_returns);
    }
}

#[test]
fn success_rate_stays_within_bounds() {
    let tables = tables();
    for (s, i) in sweep() {
        let rate = compute(&s, &i, &tables).qualitative.success_rate_percent;
        assert!((50..=95).contains(&rate), "success rate {} out of bounds", rate);
    }
}

#[test]
fn returns_increase_with_investment() {
    let tables = tables();
    for s in scenarios().into_iter().filter(|s| s.base_roi() > 0.0) {
        let mut previous: Option<(f64, f64)> = None;
        for investment in [1_000.0, 5_000.0, 25_000.0, 100_000.0, 1_000_000.0] {
            let f = compute(&s, &input(investment, 12, "retail", "medium"), &tables).financial;
            if let Some((returns, total)) = previous {
                assert!(f.expected_returns > returns, "{}: returns not increasing", s.id);
                assert!(f.total_value > total, "{}: total not increasing", s.id);
            }
            previous = Some((f.expected_returns, f.total_value));
        }
    }
}

#[test]
fn payback_is_at_least_one_month_when_defined() {
    let tables = tables();
    for (s, i) in sweep() {
        let f = compute(&s, &i, &tables).financial;
        match f.payback_period_months {
            Some(months) => {
                assert!(months >= 1);
                assert!(f.monthly_return > 0.0);
            }
            None => assert!(f.monthly_return <= 0.0),
        }
    }
}

#[test]
fn narrative_lists_respect_caps() {
    let tables = tables();
    for (s, i) in sweep() {
        let n = compute(&s, &i, &tables).narrative;
        assert!(n.success_factors.len() <= MAX_SUCCESS_FACTORS);
        assert!(n.risk_mitigations.len() <= MAX_RISK_MITIGATIONS);
        assert!(n.implementation_insights.len() <= MAX_IMPLEMENTATION_INSIGHTS);
        assert!(!n.success_factors.is_empty());
        assert!(!n.risk_mitigations.is_empty());
    }
}

#[test]
fn near_zero_multipliers_report_no_payback() {
    let mut tables = tables();
    for entry in tables.industries.values_mut() {
        entry.multiplier = 1e-9;
    }
    for entry in tables.company_sizes.values_mut() {
        entry.multiplier = 1e-9;
    }

    let s = scenario("ai-chatbot", 160.0, 200.0, RiskLevel::Low);
    let result = compute(&s, &input(25_000.0, 12, "technology", "medium"), &tables);

    assert_eq!(result.financial.expected_returns, 0.0);
    assert_eq!(result.financial.monthly_return, 0.0);
    assert_eq!(result.financial.payback_period_months, None);
    assert_eq!(result.financial.total_value, 25_000.0);
    assert!(result.financial.annualized_roi.is_finite());

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["financial"]["paybackPeriodMonths"].is_null());
}

#[test]
fn unknown_industry_uses_default_entry() {
    let tables = tables();
    let s = scenario("crm-upgrade", 90.0, 140.0, RiskLevel::Medium);
    let fallback = compute(&s, &input(50_000.0, 18, "aerospace", "medium"), &tables);
    let technology = compute(&s, &input(50_000.0, 18, "technology", "medium"), &tables);

    assert!(fallback.adjustments.industry_fallback);
    assert_eq!(fallback.adjustments.industry, "technology");
    assert_eq!(fallback.financial, technology.financial);
    assert_eq!(fallback.qualitative, technology.qualitative);
    assert_eq!(
        fallback.financial.total_value,
        fallback.financial.investment + fallback.financial.expected_returns
    );
}

#[test]
fn result_serializes_with_api_field_names() {
    let tables = tables();
    let s = scenario("ai-chatbot", 160.0, 200.0, RiskLevel::Low);
    let json = serde_json::to_value(compute(&s, &input(25_000.0, 12, "technology", "medium"), &tables)).unwrap();

    assert_eq!(json["scenarioId"], "ai-chatbot");
    assert_eq!(json["financial"]["expectedReturns"], 56_250.0);
    assert_eq!(json["financial"]["annualizedROI"], 225.0);
    assert_eq!(json["qualitative"]["riskLevel"], "low");
    assert_eq!(json["context"]["complexityLabel"], "medium");
    assert!(json["context"]["industryBenchmarkROI"].is_number());
    assert!(json["narrative"]["successFactors"].is_array());
}
