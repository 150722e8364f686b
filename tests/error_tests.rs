//! Error type tests

use gridstore::error::{GridError, GridResult};

// ═══════════════════════════════════════════════════════════════════════════
// DISPLAY FORMATTING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_io_error_display() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = GridError::from(io);
    assert_eq!(err.to_string(), "IO error: denied");
}

#[test]
fn test_sqlite_error_display() {
    let err = GridError::from(rusqlite::Error::QueryReturnedNoRows);
    assert!(err.to_string().starts_with("SQLite error: "));
}

#[test]
fn test_json_error_display() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
    let err = GridError::from(parse_err);
    assert!(err.to_string().starts_with("JSON error: "));
}

#[test]
fn test_store_error_display() {
    let err = GridError::Store("connection lost".to_string());
    assert_eq!(err.to_string(), "Store error: connection lost");
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERSIONS & PROPAGATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_from_conversions_pick_the_right_variant() {
    let io: GridError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io, GridError::Io(_)));

    let sqlite: GridError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(sqlite, GridError::Sqlite(_)));

    let json: GridError = serde_json::from_str::<serde_json::Value>("]").unwrap_err().into();
    assert!(matches!(json, GridError::Json(_)));
}

#[test]
fn test_question_mark_propagation_through_grid_result() {
    fn parse(input: &str) -> GridResult<serde_json::Value> {
        let value = serde_json::from_str(input)?;
        Ok(value)
    }

    assert!(parse(r#"{"ok": true}"#).is_ok());
    assert!(matches!(parse("nope"), Err(GridError::Json(_))));
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GridError>();
}
