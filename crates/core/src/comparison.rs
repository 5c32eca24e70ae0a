//! Scenario comparison
//!
//! Runs the engine for several scenarios under one set of inputs and ranks
//! the results.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::adjustments::AdjustmentTables;
use crate::engine::compute;
use crate::result::CalculationResult;
use crate::scenario::ScenarioDefinition;
use crate::validation::CalculationInput;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    /// 1-based position after ranking
    pub rank: usize,
    pub scenario_id: String,
    pub result: CalculationResult,
}

/// Project every scenario and rank the results
///
/// Order: ROI descending, then recoverable before not recoverable, then
/// shorter payback, then scenario id.
pub fn compare(
    scenarios: &[&ScenarioDefinition],
    input: &CalculationInput,
    tables: &AdjustmentTables,
) -> Vec<ScenarioComparison> {
    let mut results: Vec<CalculationResult> = scenarios
        .iter()
        .map(|scenario| compute(scenario, &input.for_scenario(&scenario.id), tables))
        .collect();

    results.sort_by(rank_order);

    results
        .into_iter()
        .enumerate()
        .map(|(i, result)| ScenarioComparison {
            rank: i + 1,
            scenario_id: result.scenario_id.clone(),
            result,
        })
        .collect()
}

fn rank_order(a: &CalculationResult, b: &CalculationResult) -> Ordering {
    b.financial
        .roi_percentage
        .total_cmp(&a.financial.roi_percentage)
        .then_with(|| {
            b.financial
                .is_recoverable()
                .cmp(&a.financial.is_recoverable())
        })
        .then_with(|| {
            a.financial
                .payback_period_months
                .cmp(&b.financial.payback_period_months)
        })
        .then_with(|| a.scenario_id.cmp(&b.scenario_id))
}
