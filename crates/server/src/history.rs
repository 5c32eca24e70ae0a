//! Calculation history
//!
//! Submitted calculations are kept so clients can list and reopen them.
//! Storage sits behind `CalculationStore` so a persistent backend can
//! replace the bounded in-memory default.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use catalyst_core::{CalculationInput, CalculationResult};

use crate::ServerError;

/// One stored calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub input: CalculationInput,
    pub result: CalculationResult,
}

impl CalculationRecord {
    pub fn new(input: CalculationInput, result: CalculationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            input,
            result,
        }
    }
}

/// Calculation storage
#[async_trait]
pub trait CalculationStore: Send + Sync {
    /// Store a record
    async fn save(&self, record: CalculationRecord) -> Result<(), ServerError>;

    /// Get a record by ID
    async fn get(&self, id: Uuid) -> Result<Option<CalculationRecord>, ServerError>;

    /// Most recent records first
    async fn list(&self, limit: usize) -> Result<Vec<CalculationRecord>, ServerError>;

    /// Delete a record; returns whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool, ServerError>;

    /// Number of stored records
    async fn len(&self) -> usize;
}

/// Bounded in-memory store; the oldest record is evicted when full
pub struct InMemoryCalculationStore {
    records: RwLock<VecDeque<CalculationRecord>>,
    capacity: usize,
}

impl InMemoryCalculationStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait]
impl CalculationStore for InMemoryCalculationStore {
    async fn save(&self, record: CalculationRecord) -> Result<(), ServerError> {
        let mut records = self.records.write();
        while records.len() >= self.capacity {
            if let Some(evicted) = records.pop_front() {
                tracing::debug!(id = %evicted.id, "Evicted oldest calculation");
            }
        }
        records.push_back(record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<CalculationRecord>, ServerError> {
        Ok(self.records.read().iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, limit: usize) -> Result<Vec<CalculationRecord>, ServerError> {
        Ok(self
            .records
            .read()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServerError> {
        let mut records = self.records.write();
        match records.iter().position(|r| r.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn len(&self) -> usize {
        self.records.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalyst_core::{
        compute, AdjustmentTables, Bounds, RiskAdjustment, RiskAdjustments, RiskLevel,
        ScenarioDefinition,
    };
    use std::collections::BTreeMap;
    use std::num::NonZeroU32;

    fn record(investment: f64) -> CalculationRecord {
        let risk = RiskAdjustment {
            multiplier: 1.0,
            confidence: 80.0,
            success_rate_bonus: 0,
        };
        let tables = AdjustmentTables {
            industries: BTreeMap::new(),
            company_sizes: BTreeMap::new(),
            risk_levels: RiskAdjustments {
                low: risk.clone(),
                medium: risk.clone(),
                high: risk,
            },
            default_industry: "technology".to_string(),
            default_company_size: "medium".to_string(),
        };
        let scenario = ScenarioDefinition {
            id: "ai-chatbot".to_string(),
            name: "Chatbot".to_string(),
            category: "automation".to_string(),
            description: String::new(),
            expected_roi: Bounds::new(160.0, 200.0),
            risk_level: RiskLevel::Low,
            cost_range: Bounds::new(15_000.0, 75_000.0),
            benefits: vec![],
            timeframe_months: None,
        };
        let input = CalculationInput {
            investment,
            timeframe_months: NonZeroU32::new(12).unwrap(),
            industry: "technology".to_string(),
            company_size: "medium".to_string(),
            currency: "USD".to_string(),
            scenario_id: scenario.id.clone(),
        };
        let result = compute(&scenario, &input, &tables);
        CalculationRecord::new(input, result)
    }

    #[tokio::test]
    async fn test_save_get_delete() {
        let store = InMemoryCalculationStore::new(10);
        let saved = record(25_000.0);
        let id = saved.id;

        store.save(saved.clone()).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(id).await.unwrap(), Some(saved));

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert_eq!(store.get(id).await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_limited() {
        let store = InMemoryCalculationStore::new(10);
        for investment in [1_000.0, 2_000.0, 3_000.0] {
            store.save(record(investment)).await.unwrap();
        }

        let listed = store.list(2).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].input.investment, 3_000.0);
        assert_eq!(listed[1].input.investment, 2_000.0);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let store = InMemoryCalculationStore::new(2);
        let first = record(1_000.0);
        let first_id = first.id;
        store.save(first).await.unwrap();
        store.save(record(2_000.0)).await.unwrap();
        store.save(record(3_000.0)).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(first_id).await.unwrap(), None);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(record(25_000.0)).unwrap();
        assert!(json["createdAt"].is_string());
        assert_eq!(json["input"]["timeframe"], 12);
        assert_eq!(json["result"]["financial"]["roiPercentage"], 180.0);
    }
}
