//! HTTP Endpoints
//!
//! REST API for the ROI calculator.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use catalyst_core::{
    validate_comparison, validate_request, CalculationRequest, ComparisonRequest, RoiProjector,
    ScenarioDefinition,
};

use crate::history::CalculationRecord;
use crate::metrics::{record_calculation, record_fallback, Outcome};
use crate::state::AppState;
use crate::ServerError;

/// Default page size for GET /api/calculations
const DEFAULT_LIST_LIMIT: usize = 50;
/// Largest page GET /api/calculations will return
const MAX_LIST_LIMIT: usize = 500;

const DEV_ORIGIN: &str = "http://localhost:3000";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.get_config();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    let timeout = Duration::from_secs(config.server.timeout_seconds);
    let admin_enabled = config.server.admin_enabled;
    drop(config);

    let router = Router::new()
        // Catalog
        .route("/api/scenarios", get(list_scenarios))
        .route("/api/scenarios/:id", get(get_scenario))
        .route("/api/categories", get(list_categories))
        .route("/api/adjustments", get(get_adjustments))
        .route("/api/currencies", get(list_currencies))
        // Calculations
        .route("/api/calculate", post(calculate))
        .route("/api/compare", post(compare))
        .route("/api/calculations", get(list_calculations))
        .route(
            "/api/calculations/:id",
            get(get_calculation).delete(delete_calculation),
        )
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler));

    let router = if admin_enabled {
        router
            .route("/admin/reload-catalog", post(reload_catalog))
            .route("/admin/reload-config", post(reload_config))
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let parsed_origins = if parsed_origins.is_empty() {
        if !origins.is_empty() {
            tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        } else {
            tracing::info!("No CORS origins configured, defaulting to {}", DEV_ORIGIN);
        }
        vec![HeaderValue::from_static(DEV_ORIGIN)]
    } else {
        tracing::info!("CORS configured with {} origins", parsed_origins.len());
        parsed_origins
    };

    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Debug, Deserialize)]
struct ScenarioQuery {
    category: Option<String>,
}

async fn list_scenarios(
    State(state): State<AppState>,
    query: Result<Query<ScenarioQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let Query(query) = query.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    let snapshot = state.snapshot();

    let scenarios: Vec<&ScenarioDefinition> = match query.category.as_deref() {
        Some(category) => snapshot.catalog.by_category(category.trim()).collect(),
        None => snapshot.catalog.iter().collect(),
    };

    Ok(Json(serde_json::json!({
        "scenarios": scenarios,
        "count": scenarios.len(),
    })))
}

async fn get_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScenarioDefinition>, ServerError> {
    state
        .snapshot()
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("scenario '{}'", id)))
}

async fn list_categories(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot();
    Json(serde_json::json!({
        "categories": snapshot.catalog.categories(),
    }))
}

async fn get_adjustments(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot();
    let tables = snapshot.tables.as_ref();
    Json(serde_json::json!({
        "industries": tables.industries,
        "companySizes": tables.company_sizes,
        "riskLevels": tables.risk_levels,
        "defaultIndustry": tables.default_industry,
        "defaultCompanySize": tables.default_company_size,
    }))
}

async fn list_currencies(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot();
    Json(serde_json::json!({
        "currencies": snapshot.currencies,
    }))
}

/// POST /api/calculate
///
/// Validates the request, projects the scenario and stores the result in
/// the calculation history.
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationRecord>, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    let snapshot = state.snapshot();

    let (scenario, input) = match validate_request(&request, &snapshot.catalog) {
        Ok(validated) => validated,
        Err(e) => {
            let label = scenario_label(&snapshot, request.scenario_id.as_deref());
            record_calculation(label, Outcome::Rejected, None);
            tracing::debug!(error = %e, "Rejected calculation request");
            return Err(e.into());
        }
    };

    let started = Instant::now();
    let result = snapshot.projector().project(scenario, &input);
    record_calculation(&scenario.id, Outcome::Ok, Some(started.elapsed()));
    record_fallback(&result);

    tracing::info!(
        scenario = %scenario.id,
        roi = result.financial.roi_percentage,
        payback_months = ?result.financial.payback_period_months,
        "Calculated projection"
    );

    let record = CalculationRecord::new(input, result);
    if let Some(history) = &state.history {
        history.save(record.clone()).await?;
    }

    Ok(Json(record))
}

/// Known scenario id, or "unknown" to keep metric labels bounded
fn scenario_label<'a>(
    snapshot: &'a catalyst_config::CatalogSnapshot,
    scenario_id: Option<&str>,
) -> &'a str {
    scenario_id
        .and_then(|id| snapshot.catalog.get(id.trim()))
        .map(|s| s.id.as_str())
        .unwrap_or("unknown")
}

/// POST /api/compare
async fn compare(
    State(state): State<AppState>,
    payload: Result<Json<ComparisonRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    let snapshot = state.snapshot();

    let (scenarios, input) = match validate_comparison(&request, &snapshot.catalog) {
        Ok(validated) => validated,
        Err(e) => {
            let first = request.scenario_ids.first().map(String::as_str);
            record_calculation(scenario_label(&snapshot, first), Outcome::Rejected, None);
            tracing::debug!(error = %e, "Rejected comparison request");
            return Err(e.into());
        }
    };

    let started = Instant::now();
    let comparisons = snapshot.projector().compare(&scenarios, &input);
    let elapsed = started.elapsed();
    for comparison in &comparisons {
        record_calculation(&comparison.scenario_id, Outcome::Ok, None);
        record_fallback(&comparison.result);
    }

    tracing::info!(
        scenarios = comparisons.len(),
        elapsed_us = elapsed.as_micros() as u64,
        "Compared scenarios"
    );

    Ok(Json(serde_json::json!({
        "comparisons": comparisons,
        "count": comparisons.len(),
    })))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<usize>,
}

async fn list_calculations(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let Query(query) = query.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    let history = history_store(&state)?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let calculations = history.list(limit).await?;

    Ok(Json(serde_json::json!({
        "calculations": calculations,
        "count": calculations.len(),
        "total": history.len().await,
    })))
}

async fn get_calculation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CalculationRecord>, ServerError> {
    let history = history_store(&state)?;
    let id = parse_id(&id)?;

    history
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("calculation '{}'", id)))
}

async fn delete_calculation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let history = history_store(&state)?;
    let id = parse_id(&id)?;

    if history.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound(format!("calculation '{}'", id)))
    }
}

fn history_store(
    state: &AppState,
) -> Result<&std::sync::Arc<dyn crate::history::CalculationStore>, ServerError> {
    state
        .history
        .as_ref()
        .ok_or_else(|| ServerError::NotFound("calculation history is disabled".to_string()))
}

fn parse_id(id: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(id)
        .map_err(|_| ServerError::InvalidRequest(format!("'{}' is not a calculation id", id)))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot();
    let stored = match &state.history {
        Some(history) => Some(history.len().await),
        None => None,
    };

    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": {
            "scenarios": snapshot.catalog.len(),
            "generation": snapshot.generation,
            "loadedAt": snapshot.loaded_at,
        },
        "history": {
            "enabled": stored.is_some(),
            "stored": stored,
        },
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
    let handle = state
        .metrics
        .as_ref()
        .filter(|_| state.metrics_enabled())
        .ok_or_else(|| ServerError::NotFound("metrics are disabled".to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

/// Catalog reload endpoint
///
/// POST /admin/reload-catalog
///
/// Re-reads scenarios, adjustment tables and currencies. In-flight
/// calculations finish against the snapshot they started with.
async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let snapshot = state.reload_catalog()?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "generation": snapshot.generation,
        "scenarios": snapshot.catalog.len(),
        "loadedAt": snapshot.loaded_at,
    })))
}

/// Config reload endpoint
///
/// POST /admin/reload-config
///
/// Note: listener address, CORS and timeouts are only applied at startup.
async fn reload_config(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    state.reload_config()?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Configuration reloaded successfully"
    })))
}
