use rusqlite::Connection;

pub(crate) fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS cells (
          sheet_name TEXT NOT NULL,
          row INTEGER NOT NULL,
          col INTEGER NOT NULL,
          cell_value TEXT NOT NULL,
          PRIMARY KEY (sheet_name, row, col)
        );
        "#,
    )
}
