//! SQLite-backed cell store
//!
//! Embedded persistence: one database file, one `cells` table keyed by the
//! identity triple. The connection handle is created once at startup and
//! shared behind a mutex; each upsert runs a read-then-write inside its own
//! transaction, which makes the find-or-create step indivisible for
//! concurrent callers.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::{schema, CellStore};
use crate::error::GridResult;
use crate::types::{CellKey, CellRecord, UpsertOutcome};

/// Persistent cell store backed by an embedded SQLite database.
///
/// Cell values are stored as JSON text, so whatever the front-end submitted
/// comes back byte-for-byte equivalent.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open_path(path: impl AsRef<Path>) -> GridResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database. Contents are lost on drop.
    pub fn open_in_memory() -> GridResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> GridResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        schema::init(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl CellStore for SqliteStore {
    async fn find_and_upsert(&self, key: &CellKey, value: &Value) -> GridResult<UpsertOutcome> {
        let mut conn = self.conn.lock().expect("cell store mutex poisoned");
        let tx = conn.transaction()?;

        let existing: Option<Value> = tx
            .query_row(
                "SELECT cell_value FROM cells WHERE sheet_name = ?1 AND row = ?2 AND col = ?3",
                params![key.sheet_name, key.row, key.col],
                |r| r.get(0),
            )
            .optional()?;

        let outcome = match existing {
            None => {
                tx.execute(
                    "INSERT INTO cells (sheet_name, row, col, cell_value) VALUES (?1, ?2, ?3, ?4)",
                    params![key.sheet_name, key.row, key.col, value],
                )?;
                UpsertOutcome {
                    created: true,
                    modified: false,
                }
            }
            Some(ref old) if old == value => UpsertOutcome::default(),
            Some(_) => {
                tx.execute(
                    "UPDATE cells SET cell_value = ?4 WHERE sheet_name = ?1 AND row = ?2 AND col = ?3",
                    params![key.sheet_name, key.row, key.col, value],
                )?;
                UpsertOutcome {
                    created: false,
                    modified: true,
                }
            }
        };

        tx.commit()?;
        Ok(outcome)
    }

    async fn scan_all(&self) -> GridResult<Vec<CellRecord>> {
        let conn = self.conn.lock().expect("cell store mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT sheet_name, row, col, cell_value FROM cells ORDER BY sheet_name, row, col",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(CellRecord {
                sheet_name: r.get(0)?,
                row: r.get(1)?,
                col: r.get(2)?,
                cell_value: r.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    async fn health_check(&self) -> GridResult<()> {
        let conn = self.conn.lock().expect("cell store mutex poisoned");
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}
