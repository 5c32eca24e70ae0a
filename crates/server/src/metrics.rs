//! Prometheus metrics
//!
//! Recorded through the `metrics` facade and rendered by
//! `metrics-exporter-prometheus` at GET /metrics.

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

use catalyst_core::CalculationResult;

pub const CALCULATIONS_TOTAL: &str = "catalyst_calculations_total";
pub const ADJUSTMENT_FALLBACK_TOTAL: &str = "catalyst_adjustment_fallback_total";
pub const CALCULATION_DURATION_SECONDS: &str = "catalyst_calculation_duration_seconds";

const DURATION_BUCKETS: [f64; 8] = [
    0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05,
];

static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

/// Install the global Prometheus recorder
///
/// Safe to call more than once; later calls return the first handle.
/// Returns `None` if another recorder was already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_init(|| {
            let installed = PrometheusBuilder::new()
                .set_buckets_for_metric(
                    Matcher::Full(CALCULATION_DURATION_SECONDS.to_string()),
                    &DURATION_BUCKETS,
                )
                .and_then(|builder| builder.install_recorder());

            match installed {
                Ok(handle) => Some(handle),
                Err(e) => {
                    tracing::warn!(error = %e, "Prometheus recorder not installed");
                    None
                }
            }
        })
        .clone()
}

/// Outcome label for a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Rejected,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Rejected => "rejected",
        }
    }
}

/// Count a calculation and record its engine time
pub fn record_calculation(scenario: &str, outcome: Outcome, elapsed: Option<Duration>) {
    metrics::counter!(
        CALCULATIONS_TOTAL,
        "scenario" => scenario.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    if let Some(elapsed) = elapsed {
        metrics::histogram!(CALCULATION_DURATION_SECONDS).record(elapsed.as_secs_f64());
    }
}

/// Count adjustment-table fallbacks taken by a result
pub fn record_fallback(result: &CalculationResult) {
    if result.adjustments.industry_fallback {
        metrics::counter!(ADJUSTMENT_FALLBACK_TOTAL, "table" => "industry").increment(1);
    }
    if result.adjustments.size_fallback {
        metrics::counter!(ADJUSTMENT_FALLBACK_TOTAL, "table" => "company_size").increment(1);
    }
}
