//! On-disk catalog file formats

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

use catalyst_core::ScenarioDefinition;

use crate::ConfigError;

/// scenarios.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenariosFile {
    pub scenarios: Vec<ScenarioDefinition>,
}

/// currencies.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrenciesFile {
    pub currencies: Vec<Currency>,
}

/// Currency label offered to clients
///
/// Display only; amounts are never converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub name: String,
}

impl Currency {
    /// Used when the catalog ships no currencies.yaml
    pub fn usd() -> Self {
        Self {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            name: "US Dollar".to_string(),
        }
    }
}

/// Read and parse a YAML file
pub(crate) fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
        _ => ConfigError::ParseError(format!("{}: {}", path.display(), e)),
    })?;

    serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
}
