//! Gridstore API Server binary
//!
//! Cell persistence backend for browser spreadsheets: accepts batches of
//! cell edits keyed by (sheet, row, col) and serves back everything stored.

use std::path::PathBuf;

use clap::Parser;
use gridstore::api::run_api_server;
use gridstore::api::server::{ApiConfig, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "gridstore-server")]
#[command(version)]
#[command(about = "Gridstore API Server - cell persistence backend for browser spreadsheets")]
#[command(long_about = r#"
Gridstore API Server

Accepts spreadsheet cell edits from a browser front-end and persists them
keyed by (sheet, row, col):
  - POST /api/v1/cells - Submit a batch of cell updates (one upsert per cell)
  - GET  /api/v1/cells - List every stored cell

Additional endpoints:
  - GET  /health  - Health check (probes the cell store)
  - GET  /version - Server version info
  - GET  /        - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - Embedded SQLite persistence (or --in-memory for throwaway runs)

Example usage:
  gridstore-server                            # localhost:8080, ./gridstore.db
  gridstore-server --host 0.0.0.0 --port 3000 --db /var/lib/gridstore/cells.db

  curl -X POST http://localhost:8080/api/v1/cells \
    -H "Content-Type: application/json" \
    -d '[{"sheetName": "Sheet1", "row": 0, "col": 0, "cellValue": "42"}]'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "GRIDSTORE_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "GRIDSTORE_PORT")]
    port: u16,

    /// Path to the SQLite database file (created on first run)
    #[arg(short, long, default_value = "gridstore.db", env = "GRIDSTORE_DB")]
    db: PathBuf,

    /// Keep cells in memory only; nothing is written to disk
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let store = if args.in_memory {
        StoreConfig::InMemory
    } else {
        StoreConfig::Sqlite(args.db)
    };

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        store,
    };

    run_api_server(config).await
}
