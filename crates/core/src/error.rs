//! Error types
//!
//! The engine itself never fails. These errors belong to the boundary:
//! request validation done by callers before invoking the engine, and
//! catalog construction.

use thiserror::Error;

/// Rejected calculation request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Investment must be at least {minimum}, got {actual}")]
    InvestmentBelowMinimum { minimum: f64, actual: f64 },

    #[error("Investment must be at most {maximum}, got {actual}")]
    InvestmentAboveMaximum { maximum: f64, actual: f64 },

    #[error("Investment must be a finite number")]
    InvalidInvestment,

    #[error("Timeframe must be between 1 and {maximum} months, got {actual}")]
    InvalidTimeframe { maximum: u32, actual: i64 },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Invalid currency code '{0}': expected three ASCII letters")]
    InvalidCurrency(String),

    #[error("Too many scenarios to compare: at most {maximum}, got {actual}")]
    TooManyScenarios { maximum: usize, actual: usize },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl ValidationError {
    /// Field the error refers to, for client-side highlighting
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvestmentBelowMinimum { .. }
            | Self::InvestmentAboveMaximum { .. }
            | Self::InvalidInvestment => "investment",
            Self::InvalidTimeframe { .. } => "timeframe",
            Self::UnknownScenario(_) => "scenarioId",
            Self::TooManyScenarios { .. } => "scenarioIds",
            Self::InvalidCurrency(_) => "currency",
            Self::MissingField(field) => field,
        }
    }
}

/// Invalid catalog contents
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate scenario id: {0}")]
    DuplicateScenario(String),

    #[error("Scenario id must not be empty")]
    EmptyScenarioId,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
