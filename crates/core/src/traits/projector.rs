//! ROI projector trait
//!
//! A domain-agnostic interface over the projection engine. Callers hold an
//! `Arc<dyn RoiProjector>` so the server and the offline calculator share
//! one implementation, and tests can substitute their own tables.
//!
//! # Example
//!
//! ```ignore
//! use catalyst_core::traits::{RoiProjector, TableDrivenProjector};
//!
//! let projector = TableDrivenProjector::new(snapshot.tables.clone());
//! let result = projector.project(scenario, &input);
//! println!("ROI: {}%", result.financial.roi_percentage);
//! ```

use std::sync::Arc;

use crate::adjustments::AdjustmentTables;
use crate::comparison::{self, ScenarioComparison};
use crate::engine;
use crate::result::CalculationResult;
use crate::scenario::ScenarioDefinition;
use crate::validation::CalculationInput;

/// Projects scenario returns from validated input
pub trait RoiProjector: Send + Sync {
    /// Project one scenario
    ///
    /// Total for any validated input: unknown table keys fall back to the
    /// default entry and an unrecoverable investment reports no payback
    /// period instead of failing.
    fn project(&self, scenario: &ScenarioDefinition, input: &CalculationInput)
        -> CalculationResult;

    /// Adjustment tables this projector applies
    fn tables(&self) -> &AdjustmentTables;

    /// Project several scenarios under the same input and rank them
    fn compare(
        &self,
        scenarios: &[&ScenarioDefinition],
        input: &CalculationInput,
    ) -> Vec<ScenarioComparison> {
        comparison::compare(scenarios, input, self.tables())
    }
}

/// Projector backed by adjustment tables loaded from the catalog
#[derive(Debug, Clone)]
pub struct TableDrivenProjector {
    tables: Arc<AdjustmentTables>,
}

impl TableDrivenProjector {
    pub fn new(tables: Arc<AdjustmentTables>) -> Self {
        Self { tables }
    }
}

impl RoiProjector for TableDrivenProjector {
    fn project(
        &self,
        scenario: &ScenarioDefinition,
        input: &CalculationInput,
    ) -> CalculationResult {
        engine::compute(scenario, input, &self.tables)
    }

    fn tables(&self) -> &AdjustmentTables {
        &self.tables
    }
}
