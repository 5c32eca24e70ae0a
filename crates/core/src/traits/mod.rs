//! Core traits for the projection service
//!
//! Components depend on these traits rather than concrete types so the
//! engine can be swapped or mocked:
//!
//! ```text
//! RoiProjector: scenario + validated input -> CalculationResult
//! ```

mod projector;

pub use projector::{RoiProjector, TableDrivenProjector};
