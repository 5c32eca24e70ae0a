//! Core types and projection engine for Catalyst
//!
//! This crate provides the pieces every other crate builds on:
//! - Scenario definitions and the scenario catalog
//! - Adjustment tables (industry, company size, risk level)
//! - Request validation shared by all callers
//! - The pure ROI projection engine and its narrative rules
//! - Scenario comparison
//!
//! Nothing here performs I/O. Loading the catalog from disk lives in
//! `catalyst-config`; transport lives in `catalyst-server` and
//! `catalyst-cli`.

pub mod adjustments;
pub mod catalog;
pub mod comparison;
pub mod engine;
pub mod error;
pub mod narrative;
pub mod result;
pub mod rounding;
pub mod scenario;
pub mod traits;
pub mod validation;

pub use adjustments::{
    AdjustmentTables, IndustryAdjustment, Resolved, RiskAdjustment, RiskAdjustments,
    SizeAdjustment, DEFAULT_COMPANY_SIZE_KEY, DEFAULT_INDUSTRY_KEY,
};
pub use catalog::ScenarioCatalog;
pub use comparison::{compare, ScenarioComparison};
pub use engine::compute;
pub use error::{CatalogError, Result, ValidationError};
pub use result::{
    AppliedAdjustments, CalculationResult, FinancialProjection, Narrative, ProjectionContext,
    QualitativeAssessment,
};
pub use scenario::{Bounds, Complexity, RiskLevel, ScenarioDefinition};
pub use traits::{RoiProjector, TableDrivenProjector};
pub use validation::{
    validate_comparison, validate_request, CalculationInput, CalculationRequest,
    ComparisonRequest, MAX_INVESTMENT, MIN_INVESTMENT,
};
