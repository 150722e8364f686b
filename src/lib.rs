//! Gridstore - cell persistence backend for browser spreadsheets
//!
//! A browser front-end submits batches of cell edits; Gridstore validates
//! each entry, normalizes its identity key (trimmed sheet name, row, col),
//! and upserts it into an embedded store so that every key maps to at most
//! one record. A read endpoint returns everything stored.
//!
//! # Features
//!
//! - Idempotent batch upserts keyed on (sheet, row, col)
//! - Opaque JSON cell values, stored and returned verbatim
//! - Embedded SQLite persistence plus an in-memory store
//! - HTTP API with permissive CORS for cross-origin front-ends
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gridstore::core::CellReconciler;
//! use gridstore::store::MemoryStore;
//! use gridstore::types::ProposedCell;
//! use serde_json::json;
//!
//! # async fn demo() -> gridstore::GridResult<()> {
//! let store = Arc::new(MemoryStore::new());
//! let reconciler = CellReconciler::new(store);
//!
//! let batch = vec![ProposedCell::new("Sheet1", 0, 0, json!("hello"))];
//! let summary = reconciler.reconcile(batch).await?;
//!
//! println!(
//!     "created: {}, modified: {}",
//!     summary.upserted_count, summary.modified_count
//! );
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod core;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use crate::core::CellReconciler;
pub use crate::error::{GridError, GridResult};
pub use crate::types::{CellKey, CellRecord, ProposedCell, ReconcileSummary, UpsertOutcome};
