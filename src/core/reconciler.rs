//! Batch upsert reconciliation for cell records
//!
//! The reconciler validates each proposed cell, normalizes its identity
//! key, applies one upsert per entry strictly in submission order, and
//! aggregates the created/modified counts for the caller.

use std::sync::Arc;

use tracing::debug;

use crate::error::GridResult;
use crate::store::CellStore;
use crate::types::{CellRecord, ProposedCell, ReconcileSummary};

/// Applies proposed-cell batches against a [`CellStore`].
///
/// The store handle is injected at construction; the reconciler itself
/// holds no per-request state, so one instance serves any number of
/// concurrent requests.
#[derive(Clone)]
pub struct CellReconciler {
    store: Arc<dyn CellStore>,
}

impl CellReconciler {
    #[must_use]
    pub fn new(store: Arc<dyn CellStore>) -> Self {
        Self { store }
    }

    /// Validate, normalize and upsert a batch of proposed cells.
    ///
    /// Entries are processed one at a time in input order: a batch may
    /// contain several updates to the same identity key, and each must
    /// observe the effects of the one before it. Malformed entries (any
    /// required field absent) are skipped, not counted, and do not abort
    /// the batch. The first store failure does abort it; entries already
    /// applied stay applied.
    pub async fn reconcile(&self, batch: Vec<ProposedCell>) -> GridResult<ReconcileSummary> {
        let mut summary = ReconcileSummary::default();

        for proposed in batch {
            let Some((key, value)) = proposed.into_validated() else {
                summary.skipped += 1;
                continue;
            };

            let outcome = self.store.find_and_upsert(&key, &value).await?;
            if outcome.created {
                summary.upserted_count += 1;
            } else if outcome.modified {
                summary.modified_count += 1;
            }
        }

        if summary.skipped > 0 {
            debug!(skipped = summary.skipped, "dropped malformed cell entries");
        }
        Ok(summary)
    }

    /// Every stored cell record, in store-defined order.
    pub async fn list_all(&self) -> GridResult<Vec<CellRecord>> {
        self.store.scan_all().await
    }
}
