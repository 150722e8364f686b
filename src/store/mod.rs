//! Cell store trait and implementations
//!
//! The store exclusively owns persisted records. The reconciler drives it
//! through an atomic per-key upsert and a full scan; the health endpoint
//! uses the connectivity probe.

pub mod memory;
mod schema;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GridResult;
use crate::types::{CellKey, CellRecord, UpsertOutcome};

/// Backing store for cell records.
///
/// `find_and_upsert` must be indivisible per key: concurrent writers
/// targeting the same identity key may race on order but must never
/// produce two records for one key.
#[async_trait]
pub trait CellStore: Send + Sync {
    /// Insert a record for `key` when absent, otherwise replace its value.
    ///
    /// Reports `created` for inserts, `modified` only when an existing
    /// record's value actually changed; writing an identical value reports
    /// neither.
    async fn find_and_upsert(&self, key: &CellKey, value: &Value) -> GridResult<UpsertOutcome>;

    /// Every stored record, in store-defined order.
    async fn scan_all(&self) -> GridResult<Vec<CellRecord>>;

    /// Cheap connectivity probe.
    async fn health_check(&self) -> GridResult<()>;
}
