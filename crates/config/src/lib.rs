//! Configuration management for Catalyst
//!
//! Supports loading configuration from:
//! - YAML files (config/default.yaml, config/{env}.yaml)
//! - Environment variables (CATALYST__ prefix)
//!
//! # Catalog
//!
//! Static business data lives in config/catalog/:
//! - scenarios.yaml - Scenario definitions (expected ROI, risk, cost range)
//! - adjustments.yaml - Industry, company size and risk adjustment tables
//! - currencies.yaml - Currency labels offered to clients
//!
//! The catalog is loaded into an immutable `CatalogSnapshot`, validated, and
//! published through `CatalogManager`, which swaps snapshots atomically on
//! reload.

pub mod catalog;
pub mod constants;
pub mod settings;

pub use catalog::{
    CatalogManager, CatalogSnapshot, CatalogValidator, Currency, ValidationCategory,
    ValidationFinding, ValidationReport, ValidationSeverity,
};
pub use settings::{
    load_settings, CatalogConfig, HistoryConfig, ObservabilityConfig, RuntimeEnvironment,
    startup_settings, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Catalog validation failed: {0}")]
    Validation(String),

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<catalyst_core::CatalogError> for ConfigError {
    fn from(err: catalyst_core::CatalogError) -> Self {
        ConfigError::InvalidValue {
            field: "scenarios".to_string(),
            message: err.to_string(),
        }
    }
}
