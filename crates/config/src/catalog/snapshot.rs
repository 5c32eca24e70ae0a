//! Immutable catalog snapshot

use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

use catalyst_core::{AdjustmentTables, ScenarioCatalog, TableDrivenProjector};

use super::files::{read_yaml, CurrenciesFile, Currency, ScenariosFile};
use super::validator::{CatalogValidator, ValidationSeverity};
use crate::constants::files;
use crate::ConfigError;

/// Everything a calculation reads, loaded together
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub catalog: ScenarioCatalog,
    pub tables: Arc<AdjustmentTables>,
    pub currencies: Vec<Currency>,
    pub loaded_at: DateTime<Utc>,
    /// Incremented by each successful reload
    pub generation: u64,
}

impl CatalogSnapshot {
    pub fn new(
        catalog: ScenarioCatalog,
        tables: AdjustmentTables,
        currencies: Vec<Currency>,
    ) -> Self {
        Self {
            catalog,
            tables: Arc::new(tables),
            currencies,
            loaded_at: Utc::now(),
            generation: 0,
        }
    }

    /// Load and validate the catalog in `dir`
    ///
    /// scenarios.yaml and adjustments.yaml are required; a missing
    /// currencies.yaml falls back to USD only. Critical findings fail the
    /// load, other findings are logged.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        let scenarios: ScenariosFile = read_yaml(&dir.join(files::SCENARIOS))?;
        let tables: AdjustmentTables = read_yaml(&dir.join(files::ADJUSTMENTS))?;
        let currencies = match read_yaml::<CurrenciesFile>(&dir.join(files::CURRENCIES)) {
            Ok(file) => file.currencies,
            Err(ConfigError::FileNotFound(path)) => {
                tracing::warn!(path = %path, "No currency list found, offering USD only");
                vec![Currency::usd()]
            }
            Err(e) => return Err(e),
        };

        let catalog = ScenarioCatalog::new(scenarios.scenarios)?;

        let report = CatalogValidator::new().validate(&catalog, &tables, &currencies);
        for finding in &report.findings {
            match finding.severity {
                ValidationSeverity::Warning => tracing::warn!(%finding, "Catalog warning"),
                ValidationSeverity::Error | ValidationSeverity::Critical => {
                    tracing::error!(%finding, "Catalog error")
                }
            }
        }

        if !report.is_ok() {
            let details: Vec<String> = report.critical().iter().map(|f| f.to_string()).collect();
            return Err(ConfigError::Validation(format!(
                "{}: {}",
                report.summary(),
                details.join("; ")
            )));
        }

        tracing::info!(
            dir = %dir.display(),
            scenarios = catalog.len(),
            industries = tables.industries.len(),
            company_sizes = tables.company_sizes.len(),
            currencies = currencies.len(),
            "Loaded scenario catalog"
        );

        Ok(Self::new(catalog, tables, currencies))
    }

    /// Projector over this snapshot's tables
    pub fn projector(&self) -> TableDrivenProjector {
        TableDrivenProjector::new(Arc::clone(&self.tables))
    }

    /// Look up a currency label by code, case-insensitively
    pub fn currency(&self, code: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
    }
}
