//! Hot-reloadable catalog holder

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

use super::snapshot::CatalogSnapshot;
use crate::ConfigError;

/// Publishes the current catalog snapshot
///
/// Readers take an `Arc` and keep computing against it even if a reload
/// lands mid-request. A failed reload leaves the current snapshot in place.
#[derive(Debug)]
pub struct CatalogManager {
    dir: PathBuf,
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogManager {
    /// Load the catalog from `dir`
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        let snapshot = CatalogSnapshot::load(&dir)?;
        Ok(Self::from_snapshot(dir, snapshot))
    }

    /// Wrap an already loaded snapshot; `dir` is used by later reloads
    pub fn from_snapshot(dir: impl Into<PathBuf>, snapshot: CatalogSnapshot) -> Self {
        Self {
            dir: dir.into(),
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.read().clone()
    }

    /// Re-read the catalog directory and swap in the result
    pub fn reload(&self) -> Result<Arc<CatalogSnapshot>, ConfigError> {
        let mut next = match CatalogSnapshot::load(&self.dir) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, dir = %self.dir.display(), "Catalog reload failed, keeping current catalog");
                return Err(e);
            }
        };

        let mut current = self.current.write();
        next.generation = current.generation + 1;
        let next = Arc::new(next);
        *current = Arc::clone(&next);
        drop(current);

        tracing::info!(generation = next.generation, "Catalog reloaded");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const SCENARIOS: &str = r#"
scenarios:
  - id: ai-chatbot
    name: AI Customer Service Chatbot
    category: automation
    expectedROI: { min: 160, max: 200 }
    riskLevel: low
    costRange: { min: 15000, max: 75000 }
    benefits: [ "24/7 availability" ]
"#;

    const ADJUSTMENTS: &str = r#"
industries:
  technology: { displayName: Technology, multiplier: 1.25, adoptionRate: 85, avgROI: 210, complexity: medium }
companySizes:
  medium: { displayName: Medium, multiplier: 1.0, resourceAvailability: 80, implementationSpeedIndex: 1.0, organizationalRisk: medium }
riskLevels:
  low: { multiplier: 1.0, confidence: 90, successRateBonus: 10 }
  medium: { multiplier: 0.95, confidence: 75, successRateBonus: 0 }
  high: { multiplier: 0.85, confidence: 60, successRateBonus: -10 }
"#;

    fn write_catalog(dir: &Path, scenarios: &str) {
        fs::write(dir.join("scenarios.yaml"), scenarios).unwrap();
        fs::write(dir.join("adjustments.yaml"), ADJUSTMENTS).unwrap();
    }

    #[test]
    fn test_load_without_currencies_offers_usd() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), SCENARIOS);

        let manager = CatalogManager::load(dir.path()).unwrap();
        let snapshot = manager.snapshot();
        assert_eq!(snapshot.catalog.len(), 1);
        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.currencies.len(), 1);
        assert_eq!(snapshot.currency("usd").map(|c| c.symbol.as_str()), Some("$"));
        assert_eq!(snapshot.tables.default_industry, "technology");
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), SCENARIOS);
        let manager = CatalogManager::load(dir.path()).unwrap();
        let before = manager.snapshot();

        let extended = format!(
            "{}{}",
            SCENARIOS,
            r#"
  - id: crm-upgrade
    name: CRM Upgrade
    category: sales
    expectedROI: { min: 90, max: 140 }
    riskLevel: medium
    costRange: { min: 20000, max: 120000 }
    benefits: [ "Better pipeline visibility" ]
"#
        );
        fs::write(dir.path().join("scenarios.yaml"), extended).unwrap();

        let after = manager.reload().unwrap();
        assert_eq!(after.generation, 1);
        assert_eq!(after.catalog.len(), 2);
        assert_eq!(manager.snapshot().catalog.len(), 2);
        // Holders of the old snapshot are unaffected
        assert_eq!(before.catalog.len(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_current_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), SCENARIOS);
        let manager = CatalogManager::load(dir.path()).unwrap();

        fs::write(
            dir.path().join("scenarios.yaml"),
            SCENARIOS.replace("{ min: 160, max: 200 }", "{ min: 200, max: 160 }"),
        )
        .unwrap();
        assert!(matches!(manager.reload(), Err(ConfigError::Validation(_))));

        fs::write(dir.path().join("scenarios.yaml"), "scenarios: [").unwrap();
        assert!(matches!(manager.reload(), Err(ConfigError::ParseError(_))));

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.generation, 0);
        assert!(snapshot.catalog.contains("ai-chatbot"));
    }

    #[test]
    fn test_duplicate_scenario_ids_fail_load() {
        let dir = tempfile::tempdir().unwrap();
        let duplicated = format!("{}{}", SCENARIOS, &SCENARIOS["\nscenarios:".len()..]);
        write_catalog(dir.path(), &duplicated);

        let err = CatalogManager::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_out_of_range_tables_fail_load() {
        let broken = [
            ADJUSTMENTS.replace("adoptionRate: 85", "adoptionRate: .nan"),
            ADJUSTMENTS.replace("confidence: 90", "confidence: 150"),
            ADJUSTMENTS.replace("avgROI: 210", "avgROI: .nan"),
        ];

        for adjustments in broken {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("scenarios.yaml"), SCENARIOS).unwrap();
            fs::write(dir.path().join("adjustments.yaml"), &adjustments).unwrap();

            let err = CatalogManager::load(dir.path()).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "{}", adjustments);
        }
    }

    #[test]
    fn test_inverted_cost_range_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            &SCENARIOS.replace("{ min: 15000, max: 75000 }", "{ min: 75000, max: 15000 }"),
        );

        let err = CatalogManager::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_adjustments_fail_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("scenarios.yaml"), SCENARIOS).unwrap();

        let err = CatalogManager::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
