//! Request validation
//!
//! Callers (the REST handler and the offline calculator) run raw requests
//! through this module before invoking the engine. The engine assumes its
//! input already passed these checks.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::catalog::ScenarioCatalog;
use crate::error::{Result, ValidationError};
use crate::scenario::ScenarioDefinition;

/// Business floor for the investment amount
pub const MIN_INVESTMENT: f64 = 1000.0;
/// Ceiling that keeps every derived amount finite
pub const MAX_INVESTMENT: f64 = 1e12;
/// Longest accepted projection horizon
pub const MAX_TIMEFRAME_MONTHS: u32 = 600;
/// Horizon used when neither the request nor the scenario names one
pub const DEFAULT_TIMEFRAME_MONTHS: u32 = 12;
pub const DEFAULT_CURRENCY: &str = "USD";
/// Upper bound on scenarios in a single comparison
pub const MAX_COMPARED_SCENARIOS: usize = 10;

/// Raw calculation request as received from a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub investment: Option<f64>,
    /// Months
    pub timeframe: Option<i64>,
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub company_size: String,
    pub currency: Option<String>,
}

/// Raw comparison request: one set of inputs applied to several scenarios
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    pub scenario_ids: Vec<String>,
    #[serde(flatten)]
    pub inputs: CalculationRequest,
}

/// Validated engine input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub investment: f64,
    #[serde(rename = "timeframe")]
    pub timeframe_months: NonZeroU32,
    pub industry: String,
    pub company_size: String,
    /// Presentation label only
    pub currency: String,
    pub scenario_id: String,
}

impl CalculationInput {
    pub fn timeframe(&self) -> u32 {
        self.timeframe_months.get()
    }

    /// Same inputs applied to another scenario
    pub fn for_scenario(&self, scenario_id: &str) -> Self {
        Self {
            scenario_id: scenario_id.to_string(),
            ..self.clone()
        }
    }
}

/// Validate a calculation request against the catalog
pub fn validate_request<'a>(
    request: &CalculationRequest,
    catalog: &'a ScenarioCatalog,
) -> Result<(&'a ScenarioDefinition, CalculationInput)> {
    let scenario_id = request
        .scenario_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingField("scenarioId"))?;

    let investment = validate_investment(request.investment)?;

    let scenario = catalog
        .get(scenario_id)
        .ok_or_else(|| ValidationError::UnknownScenario(scenario_id.to_string()))?;

    let timeframe_months = validate_timeframe(request.timeframe, scenario)?;
    let currency = validate_currency(request.currency.as_deref())?;

    Ok((
        scenario,
        CalculationInput {
            investment,
            timeframe_months,
            industry: request.industry.trim().to_string(),
            company_size: request.company_size.trim().to_string(),
            currency,
            scenario_id: scenario.id.clone(),
        },
    ))
}

/// Validate a comparison request, resolving every scenario id
///
/// Duplicate ids are collapsed, keeping the first occurrence. The returned
/// input carries the first scenario's id; use
/// [`CalculationInput::for_scenario`] per scenario.
pub fn validate_comparison<'a>(
    request: &ComparisonRequest,
    catalog: &'a ScenarioCatalog,
) -> Result<(Vec<&'a ScenarioDefinition>, CalculationInput)> {
    let mut ids: Vec<&str> = Vec::new();
    for id in request.scenario_ids.iter().map(|id| id.trim()) {
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return Err(ValidationError::MissingField("scenarioIds"));
    }
    if ids.len() > MAX_COMPARED_SCENARIOS {
        return Err(ValidationError::TooManyScenarios {
            maximum: MAX_COMPARED_SCENARIOS,
            actual: ids.len(),
        });
    }

    let scenarios = ids
        .iter()
        .map(|id| {
            catalog
                .get(id)
                .ok_or_else(|| ValidationError::UnknownScenario(id.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let first = CalculationRequest {
        scenario_id: Some(scenarios[0].id.clone()),
        ..request.inputs.clone()
    };
    let (_, input) = validate_request(&first, catalog)?;

    Ok((scenarios, input))
}

fn validate_investment(investment: Option<f64>) -> Result<f64> {
    let investment = investment.ok_or(ValidationError::MissingField("investment"))?;
    if !investment.is_finite() {
        return Err(ValidationError::InvalidInvestment);
    }
    if investment < MIN_INVESTMENT {
        return Err(ValidationError::InvestmentBelowMinimum {
            minimum: MIN_INVESTMENT,
            actual: investment,
        });
    }
    if investment > MAX_INVESTMENT {
        return Err(ValidationError::InvestmentAboveMaximum {
            maximum: MAX_INVESTMENT,
            actual: investment,
        });
    }
    Ok(investment)
}

fn validate_timeframe(
    timeframe: Option<i64>,
    scenario: &ScenarioDefinition,
) -> Result<NonZeroU32> {
    let months = timeframe.unwrap_or_else(|| {
        i64::from(scenario.timeframe_months.unwrap_or(DEFAULT_TIMEFRAME_MONTHS))
    });

    u32::try_from(months)
        .ok()
        .filter(|m| *m <= MAX_TIMEFRAME_MONTHS)
        .and_then(NonZeroU32::new)
        .ok_or(ValidationError::InvalidTimeframe {
            maximum: MAX_TIMEFRAME_MONTHS,
            actual: months,
        })
}

fn validate_currency(currency: Option<&str>) -> Result<String> {
    let code = currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY);

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCurrency(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}
