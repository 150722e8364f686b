//! In-memory cell store
//!
//! A BTreeMap behind an RwLock, enough for tests and for running the
//! server without a database file. Scan order is key order.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::CellStore;
use crate::error::GridResult;
use crate::types::{CellKey, CellRecord, UpsertOutcome};

/// Volatile cell store; contents are lost on shutdown.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: RwLock<BTreeMap<CellKey, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.cells.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.read().is_empty()
    }
}

#[async_trait]
impl CellStore for MemoryStore {
    async fn find_and_upsert(&self, key: &CellKey, value: &Value) -> GridResult<UpsertOutcome> {
        let mut cells = self.cells.write();
        match cells.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
                Ok(UpsertOutcome {
                    created: true,
                    modified: false,
                })
            }
            Entry::Occupied(mut slot) => {
                if slot.get() == value {
                    Ok(UpsertOutcome::default())
                } else {
                    slot.insert(value.clone());
                    Ok(UpsertOutcome {
                        created: false,
                        modified: true,
                    })
                }
            }
        }
    }

    async fn scan_all(&self) -> GridResult<Vec<CellRecord>> {
        let cells = self.cells.read();
        Ok(cells
            .iter()
            .map(|(key, value)| CellRecord::new(key.clone(), value.clone()))
            .collect())
    }

    async fn health_check(&self) -> GridResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_scan() {
        let store = MemoryStore::new();
        let outcome = store
            .find_and_upsert(&CellKey::new("S", 0, 0), &json!(1))
            .await
            .unwrap();

        assert!(outcome.created);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_same_key_never_duplicates() {
        let store = MemoryStore::new();
        store
            .find_and_upsert(&CellKey::new("Sheet1", 1, 1), &json!("a"))
            .await
            .unwrap();
        store
            .find_and_upsert(&CellKey::new("  Sheet1  ", 1, 1), &json!("b"))
            .await
            .unwrap();

        let records = store.scan_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cell_value, json!("b"));
    }

    #[tokio::test]
    async fn test_identical_value_is_not_modified() {
        let store = MemoryStore::new();
        let key = CellKey::new("S", 0, 0);

        store.find_and_upsert(&key, &json!("x")).await.unwrap();
        let outcome = store.find_and_upsert(&key, &json!("x")).await.unwrap();
        assert!(!outcome.created);
        assert!(!outcome.modified);
    }

    #[tokio::test]
    async fn test_scan_is_key_ordered() {
        let store = MemoryStore::new();
        store
            .find_and_upsert(&CellKey::new("B", 0, 0), &json!(1))
            .await
            .unwrap();
        store
            .find_and_upsert(&CellKey::new("A", 1, 0), &json!(2))
            .await
            .unwrap();
        store
            .find_and_upsert(&CellKey::new("A", 0, 0), &json!(3))
            .await
            .unwrap();

        let records = store.scan_all().await.unwrap();
        let keys: Vec<_> = records.iter().map(CellRecord::key).collect();
        assert_eq!(
            keys,
            vec![
                CellKey::new("A", 0, 0),
                CellKey::new("A", 1, 0),
                CellKey::new("B", 0, 0),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.scan_all().await.unwrap().is_empty());
    }
}
