//! Application State
//!
//! Shared state across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use std::sync::Arc;

use catalyst_config::{load_settings, CatalogManager, CatalogSnapshot, Settings};

use crate::history::{CalculationStore, InMemoryCalculationStore};
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration wrapped in RwLock for hot-reload support
    pub config: Arc<RwLock<Settings>>,
    /// Current scenario catalog and adjustment tables
    pub catalog: Arc<CatalogManager>,
    /// Calculation history, `None` when disabled
    pub history: Option<Arc<dyn CalculationStore>>,
    /// Prometheus handle for GET /metrics
    pub metrics: Option<PrometheusHandle>,
    /// Environment name for config reload
    env: Option<String>,
}

impl AppState {
    /// Create application state with the in-memory history store
    pub fn new(config: Settings, catalog: CatalogManager) -> Self {
        let history: Option<Arc<dyn CalculationStore>> = if config.history.enabled {
            Some(Arc::new(InMemoryCalculationStore::new(config.history.capacity)))
        } else {
            None
        };

        Self {
            config: Arc::new(RwLock::new(config)),
            catalog: Arc::new(catalog),
            history,
            metrics: None,
            env: None,
        }
    }

    /// Set the environment name used by `reload_config`
    pub fn with_env(mut self, env: Option<String>) -> Self {
        self.env = env;
        self
    }

    /// Replace the history store
    pub fn with_history(mut self, store: Arc<dyn CalculationStore>) -> Self {
        self.history = Some(store);
        self
    }

    /// Attach the Prometheus handle served at GET /metrics
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.catalog.snapshot()
    }

    /// Reload the catalog from disk, keeping the current one on failure
    pub fn reload_catalog(&self) -> Result<Arc<CatalogSnapshot>, ServerError> {
        Ok(self.catalog.reload()?)
    }

    /// Reload settings from files and environment
    ///
    /// Listener address, CORS and history capacity are only applied at
    /// startup.
    pub fn reload_config(&self) -> Result<(), ServerError> {
        let new_config = load_settings(self.env.as_deref())
            .map_err(|e| ServerError::Internal(format!("Failed to reload config: {}", e)))?;

        *self.config.write() = new_config;

        tracing::info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }

    /// Whether metrics are enabled in the current settings
    pub fn metrics_enabled(&self) -> bool {
        self.get_config().observability.metrics_enabled
    }
}
