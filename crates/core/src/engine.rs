//! ROI projection engine
//!
//! `compute` is a pure function: no I/O, no logging, no shared state. It
//! reads the scenario, the validated input and the adjustment tables and
//! returns a freshly allocated result, so it can be called from any number
//! of threads at once.
//!
//! Steps, in order:
//!
//! 1. base ROI = midpoint of the scenario's expected range
//! 2. resolve industry, size and risk entries
//! 3. adjusted ROI = base × industry × size × risk (unclamped)
//! 4. expected returns = round(investment × adjusted / 100)
//! 5. total value = investment + expected returns
//! 6. monthly return = round(expected returns / timeframe)
//! 7. payback = max(1, ceil(investment / monthly)), `None` if monthly ≤ 0
//! 8. annualized ROI = round2(adjusted / timeframe × 12)
//! 9. success rate = clamp(75 + bonuses, 50, 95)
//! 10. narrative lists

use crate::adjustments::{AdjustmentTables, IndustryAdjustment, RiskAdjustment, SizeAdjustment};
use crate::narrative::{self, NarrativeFacts};
use crate::result::{
    AppliedAdjustments, CalculationResult, FinancialProjection, ProjectionContext,
    QualitativeAssessment,
};
use crate::rounding::{payback_months, round_currency, round_percent};
use crate::scenario::ScenarioDefinition;
use crate::validation::CalculationInput;

pub const BASE_SUCCESS_RATE: i32 = 75;
pub const MIN_SUCCESS_RATE: i32 = 50;
pub const MAX_SUCCESS_RATE: i32 = 95;

const HIGH_ADOPTION_BONUS: i32 = 10;
const LOW_ADOPTION_PENALTY: i32 = -5;
const HIGH_RESOURCE_BONUS: i32 = 8;
const LOW_RESOURCE_PENALTY: i32 = -5;

/// Project the return of `scenario` under `input`
pub fn compute(
    scenario: &ScenarioDefinition,
    input: &CalculationInput,
    tables: &AdjustmentTables,
) -> CalculationResult {
    let base_roi = scenario.base_roi();

    let industry = tables.industry(&input.industry);
    let size = tables.company_size(&input.company_size);
    let risk = tables.risk(scenario.risk_level);

    let adjusted = adjusted_roi(base_roi, &industry.entry, &size.entry, risk);

    let investment = input.investment;
    let timeframe = input.timeframe();

    let expected_returns = round_currency(investment * (adjusted / 100.0));
    let total_value = investment + expected_returns;
    let monthly_return = round_currency(expected_returns / f64::from(timeframe));
    let payback = payback_months(investment, monthly_return);
    let annualized_roi = round_percent(adjusted / f64::from(timeframe) * 12.0);

    let industry_name = if industry.entry.display_name.is_empty() {
        &*industry.key
    } else {
        industry.entry.display_name.as_str()
    };

    let narrative = narrative::build(&NarrativeFacts {
        scenario,
        industry_name,
        industry: &industry.entry,
        size: &size.entry,
        adjusted_roi: adjusted,
        annualized_roi,
        payback_months: payback,
        timeframe_months: timeframe,
    });

    CalculationResult {
        scenario_id: scenario.id.clone(),
        currency: input.currency.clone(),
        timeframe_months: timeframe,
        financial: FinancialProjection {
            investment,
            expected_returns,
            total_value,
            roi_percentage: round_percent(adjusted),
            annualized_roi,
            payback_period_months: payback,
            monthly_return,
        },
        qualitative: QualitativeAssessment {
            success_rate_percent: success_rate(risk, &industry.entry, &size.entry),
            confidence_percent: risk.confidence,
            risk_level: scenario.risk_level,
        },
        context: ProjectionContext {
            industry_benchmark_roi: industry.entry.avg_roi,
            industry_adoption_rate: industry.entry.adoption_rate,
            complexity_label: industry.entry.complexity,
            resource_availability: size.entry.resource_availability,
            implementation_speed_index: size.entry.implementation_speed_index,
            organizational_risk: size.entry.organizational_risk,
        },
        narrative,
        adjustments: AppliedAdjustments {
            base_roi,
            industry: industry.key.to_string(),
            industry_multiplier: industry.entry.multiplier,
            industry_fallback: industry.fallback,
            company_size: size.key.to_string(),
            size_multiplier: size.entry.multiplier,
            size_fallback: size.fallback,
            risk_multiplier: risk.multiplier,
        },
    }
}

/// Apply the three multipliers to the base ROI
pub fn adjusted_roi(
    base_roi: f64,
    industry: &IndustryAdjustment,
    size: &SizeAdjustment,
    risk: &RiskAdjustment,
) -> f64 {
    base_roi * industry.multiplier * size.multiplier * risk.multiplier
}

/// Success-rate heuristic, clamped to `[50, 95]`
pub fn success_rate(
    risk: &RiskAdjustment,
    industry: &IndustryAdjustment,
    size: &SizeAdjustment,
) -> u8 {
    let adoption = if industry.adoption_rate > narrative::HIGH_ADOPTION_RATE {
        HIGH_ADOPTION_BONUS
    } else if industry.adoption_rate < narrative::LOW_ADOPTION_RATE {
        LOW_ADOPTION_PENALTY
    } else {
        0
    };

    let resources = if size.resource_availability > narrative::HIGH_RESOURCE_AVAILABILITY {
        HIGH_RESOURCE_BONUS
    } else if size.resource_availability < narrative::LOW_RESOURCE_AVAILABILITY {
        LOW_RESOURCE_PENALTY
    } else {
        0
    };

    let rate = BASE_SUCCESS_RATE
        .saturating_add(risk.success_rate_bonus)
        .saturating_add(adoption)
        .saturating_add(resources)
        .clamp(MIN_SUCCESS_RATE, MAX_SUCCESS_RATE);

    // Clamped to 50..=95 above
    rate as u8
}
