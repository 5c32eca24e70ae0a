//! Command implementations, shared validation and engine with the server

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use catalyst_config::{load_settings, CatalogSnapshot};
use catalyst_core::{
    validate_comparison, validate_request, CalculationRequest, CalculationResult,
    ComparisonRequest, RoiProjector, ScenarioComparison, ScenarioDefinition,
};

/// Catalog directory from the flag, else from settings
pub fn resolve_catalog_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }

    let env = std::env::var("CATALYST_ENV").ok();
    match load_settings(env.as_deref()) {
        Ok(settings) => PathBuf::from(settings.catalog.dir),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load settings, using default catalog directory");
            PathBuf::from(catalyst_config::constants::defaults::CATALOG_DIR)
        }
    }
}

pub fn load_catalog(dir: &Path) -> Result<CatalogSnapshot> {
    CatalogSnapshot::load(dir)
        .with_context(|| format!("failed to load catalog from {}", dir.display()))
}

pub fn calculate(snapshot: &CatalogSnapshot, request: &CalculationRequest) -> Result<CalculationResult> {
    let (scenario, input) =
        validate_request(request, &snapshot.catalog).context("invalid calculation request")?;
    Ok(snapshot.projector().project(scenario, &input))
}

pub fn compare(
    snapshot: &CatalogSnapshot,
    request: &ComparisonRequest,
) -> Result<Vec<ScenarioComparison>> {
    let (scenarios, input) =
        validate_comparison(request, &snapshot.catalog).context("invalid comparison request")?;
    Ok(snapshot.projector().compare(&scenarios, &input))
}

pub fn scenarios<'a>(
    snapshot: &'a CatalogSnapshot,
    category: Option<&'a str>,
) -> Vec<&'a ScenarioDefinition> {
    match category {
        Some(category) => snapshot.catalog.by_category(category).collect(),
        None => snapshot.catalog.iter().collect(),
    }
}
