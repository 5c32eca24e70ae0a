//! Scenario catalog
//!
//! Immutable, id-keyed collection of scenario definitions.

use std::collections::BTreeMap;

use crate::error::CatalogError;
use crate::scenario::ScenarioDefinition;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioCatalog {
    scenarios: BTreeMap<String, ScenarioDefinition>,
}

impl ScenarioCatalog {
    /// Build a catalog, rejecting empty and duplicate ids
    pub fn new(
        scenarios: impl IntoIterator<Item = ScenarioDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for scenario in scenarios {
            if scenario.id.trim().is_empty() {
                return Err(CatalogError::EmptyScenarioId);
            }
            if map.contains_key(&scenario.id) {
                return Err(CatalogError::DuplicateScenario(scenario.id));
            }
            map.insert(scenario.id.clone(), scenario);
        }
        Ok(Self { scenarios: map })
    }

    pub fn get(&self, id: &str) -> Option<&ScenarioDefinition> {
        self.scenarios.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scenarios.contains_key(id)
    }

    /// Scenarios in id order
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioDefinition> {
        self.scenarios.values()
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a ScenarioDefinition> + 'a {
        self.scenarios
            .values()
            .filter(move |s| s.category.eq_ignore_ascii_case(category))
    }

    /// Sorted, deduplicated category names
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .scenarios
            .values()
            .map(|s| s.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scenario::{Bounds, RiskLevel};

    pub(crate) fn scenario(id: &str, category: &str, min: f64, max: f64, risk: RiskLevel) -> ScenarioDefinition {
        ScenarioDefinition {
            id: id.to_string(),
            name: id.replace('-', " "),
            category: category.to_string(),
            description: String::new(),
            expected_roi: Bounds::new(min, max),
            risk_level: risk,
            cost_range: Bounds::new(10_000.0, 100_000.0),
            benefits: vec!["Reduced manual work".to_string()],
            timeframe_months: None,
        }
    }

    #[test]
    fn test_catalog_lookup_and_order() {
        let catalog = ScenarioCatalog::new(vec![
            scenario("rpa-invoicing", "automation", 120.0, 180.0, RiskLevel::Medium),
            scenario("ai-chatbot", "automation", 160.0, 200.0, RiskLevel::Low),
            scenario("crm-upgrade", "sales", 90.0, 140.0, RiskLevel::Medium),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("ai-chatbot"));
        assert!(catalog.get("missing").is_none());

        let ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ai-chatbot", "crm-upgrade", "rpa-invoicing"]);
    }

    #[test]
    fn test_categories() {
        let catalog = ScenarioCatalog::new(vec![
            scenario("a", "sales", 10.0, 20.0, RiskLevel::Low),
            scenario("b", "automation", 10.0, 20.0, RiskLevel::Low),
            scenario("c", "sales", 10.0, 20.0, RiskLevel::Low),
            scenario("d", "", 10.0, 20.0, RiskLevel::Low),
        ])
        .unwrap();

        assert_eq!(catalog.categories(), vec!["automation", "sales"]);
        assert_eq!(catalog.by_category("SALES").count(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ScenarioCatalog::new(vec![
            scenario("a", "sales", 10.0, 20.0, RiskLevel::Low),
            scenario("a", "sales", 30.0, 40.0, RiskLevel::High),
        ]);
        assert_eq!(result, Err(CatalogError::DuplicateScenario("a".to_string())));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = ScenarioCatalog::new(vec![scenario(" ", "sales", 10.0, 20.0, RiskLevel::Low)]);
        assert_eq!(result, Err(CatalogError::EmptyScenarioId));
    }
}
