use serde::{Deserialize, Serialize};
use serde_json::Value;

//==============================================================================
// Identity & Records
//==============================================================================

/// Composite identity of a cell: (trimmed sheet name, row, col).
///
/// At most one record exists per key at any time. The constructor trims
/// surrounding whitespace from the sheet name so every lookup and storage
/// operation sees the normalized form. Row and column indices are taken as
/// given: negative or arbitrarily large values are legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub sheet_name: String,
    pub row: i64,
    pub col: i64,
}

impl CellKey {
    #[must_use]
    pub fn new(sheet_name: &str, row: i64, col: i64) -> Self {
        Self {
            sheet_name: sheet_name.trim().to_string(),
            row,
            col,
        }
    }
}

/// A stored cell, the sole entity Gridstore persists.
///
/// `cell_value` is opaque: whatever JSON the front-end submitted is stored
/// and returned verbatim, with no interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub sheet_name: String,
    pub row: i64,
    pub col: i64,
    pub cell_value: Value,
}

impl CellRecord {
    #[must_use]
    pub fn new(key: CellKey, cell_value: Value) -> Self {
        Self {
            sheet_name: key.sheet_name,
            row: key.row,
            col: key.col,
            cell_value,
        }
    }

    /// Identity triple of this record.
    #[must_use]
    pub fn key(&self) -> CellKey {
        CellKey::new(&self.sheet_name, self.row, self.col)
    }
}

//==============================================================================
// Inbound Batch Entries
//==============================================================================

/// One entry of an inbound update batch, before validation.
///
/// Every field is optional on the wire. An entry is well-formed iff all four
/// fields are present. JSON `null` deserializes to `None` and counts as
/// absent, matching how `undefined` travels over JSON; an explicit empty
/// string or zero is present and well-formed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedCell {
    pub sheet_name: Option<String>,
    pub row: Option<i64>,
    pub col: Option<i64>,
    pub cell_value: Option<Value>,
}

impl ProposedCell {
    /// Convenience constructor for a fully populated entry.
    #[must_use]
    pub fn new(sheet_name: &str, row: i64, col: i64, cell_value: Value) -> Self {
        Self {
            sheet_name: Some(sheet_name.to_string()),
            row: Some(row),
            col: Some(col),
            cell_value: Some(cell_value),
        }
    }

    /// Validate and normalize into an identity key plus value.
    ///
    /// Returns `None` when any required field is missing; callers skip such
    /// entries without failing the batch.
    pub fn into_validated(self) -> Option<(CellKey, Value)> {
        match (self.sheet_name, self.row, self.col, self.cell_value) {
            (Some(sheet_name), Some(row), Some(col), Some(cell_value)) => {
                Some((CellKey::new(&sheet_name, row, col), cell_value))
            }
            _ => None,
        }
    }
}

//==============================================================================
// Store & Batch Results
//==============================================================================

/// Result of one per-key store upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertOutcome {
    /// No record existed for the key; a new one was inserted.
    pub created: bool,
    /// A record existed and its value was replaced with a different one.
    /// A matched-but-unchanged write leaves this false.
    pub modified: bool,
}

/// Aggregate counts for one reconciled batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileSummary {
    /// Records whose stored value was replaced.
    pub modified_count: u64,
    /// Records newly created.
    pub upserted_count: u64,
    /// Malformed entries dropped from the batch. Logged, never on the wire.
    pub skipped: u64,
}
