//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{defaults, limits};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Where the scenario catalog is read from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Calculation history retention
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_observability()?;
        self.validate_catalog()?;
        self.validate_history()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.host.trim().is_empty() {
            return Err(ConfigError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() {
            if !server.cors_enabled {
                return Err(ConfigError::InvalidValue {
                    field: "server.cors_enabled".to_string(),
                    message: "Permissive CORS is not allowed in production".to_string(),
                });
            }
            if server.cors_origins.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "server.cors_origins".to_string(),
                    message: "At least one origin must be configured in production".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_ascii_lowercase();
        if !limits::LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Unknown level '{}', expected one of {:?}",
                    self.observability.log_level,
                    limits::LOG_LEVELS
                ),
            });
        }
        Ok(())
    }

    fn validate_catalog(&self) -> Result<(), ConfigError> {
        if self.catalog.dir.trim().is_empty() {
            return Err(ConfigError::MissingField("catalog.dir".to_string()));
        }
        Ok(())
    }

    fn validate_history(&self) -> Result<(), ConfigError> {
        let capacity = self.history.capacity;
        if self.history.enabled && !(1..=limits::MAX_HISTORY_CAPACITY).contains(&capacity) {
            return Err(ConfigError::InvalidValue {
                field: "history.capacity".to_string(),
                message: format!(
                    "Must be between 1 and {}, got {}",
                    limits::MAX_HISTORY_CAPACITY,
                    capacity
                ),
            });
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS; when disabled any origin is allowed
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins, empty means http://localhost:3000
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Expose POST /admin/reload-catalog
    #[serde(default = "default_true")]
    pub admin_enabled: bool,
}

fn default_host() -> String {
    defaults::HOST.to_string()
}
fn default_port() -> u16 {
    defaults::PORT
}
fn default_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
            admin_enabled: true,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level, overridden by RUST_LOG when set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Record metrics and serve GET /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Catalog location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding scenarios.yaml, adjustments.yaml and currencies.yaml
    #[serde(default = "default_catalog_dir")]
    pub dir: String,
}

fn default_catalog_dir() -> String {
    defaults::CATALOG_DIR.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: default_catalog_dir(),
        }
    }
}

/// Calculation history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Keep submitted calculations for later retrieval
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of stored calculations; oldest are evicted first
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_capacity() -> usize {
    defaults::HISTORY_CAPACITY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_history_capacity(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (CATALYST__ prefix, e.g. CATALYST__SERVER__PORT)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("CATALYST")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("server.cors_origins"),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

/// Settings to start a process with
///
/// Without an environment name a broken configuration falls back to
/// development defaults. A named environment must load cleanly.
pub fn startup_settings(
    env: Option<&str>,
    loaded: Result<Settings, ConfigError>,
) -> Result<Settings, ConfigError> {
    match (loaded, env) {
        (Ok(settings), _) => Ok(settings),
        (Err(e), Some(name)) => Err(ConfigError::Environment(format!(
            "settings for environment '{}' failed to load: {}",
            name, e
        ))),
        (Err(e), None) => {
            tracing::warn!(error = %e, "Failed to load config, using development defaults");
            Ok(Settings::default())
        }
    }
}
