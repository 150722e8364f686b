//! Gridstore API Server implementation
//!
//! HTTP REST API server using Axum. Accepts cell update batches from the
//! browser front-end and serves back everything stored.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::core::CellReconciler;
use crate::store::{CellStore, MemoryStore, SqliteStore};

use super::handlers;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
}

/// Which store backend the server runs against
#[derive(Clone, Debug)]
pub enum StoreConfig {
    /// Embedded SQLite database at the given path.
    Sqlite(PathBuf),
    /// Volatile in-memory store.
    InMemory,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            store: StoreConfig::Sqlite(PathBuf::from("gridstore.db")),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub version: String,
    pub store: Arc<dyn CellStore>,
    pub reconciler: CellReconciler,
}

impl AppState {
    /// Build the state around an owned store handle; the reconciler shares
    /// the same handle.
    pub fn new(version: impl Into<String>, store: Arc<dyn CellStore>) -> Self {
        let reconciler = CellReconciler::new(Arc::clone(&store));
        Self {
            version: version.into(),
            store,
            reconciler,
        }
    }
}

/// Build the router with all routes and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS: the browser front-end is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Cell endpoints
        .route(
            "/api/v1/cells",
            get(handlers::list_cells).post(handlers::update_cells),
        )
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridstore=info,tower_http=info".into()),
        )
        .init();

    let store = open_store(&config.store)?;
    let state = Arc::new(AppState::new(env!("CARGO_PKG_VERSION"), store));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📊 Gridstore API Server starting on http://{}", addr);
    info!("   Endpoints: GET/POST /api/v1/cells");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gridstore API Server shutdown complete");
    Ok(())
}

/// Open the configured store backend.
///
/// A store that cannot be opened is fatal: no request could succeed until
/// connectivity is restored, so the error is logged and propagated.
fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn CellStore>> {
    match config {
        StoreConfig::Sqlite(path) => match SqliteStore::open_path(path) {
            Ok(store) => {
                info!("Opened cell store at {}", path.display());
                Ok(Arc::new(store))
            }
            Err(e) => {
                error!("Failed to open cell store at {}: {}", path.display(), e);
                Err(e.into())
            }
        },
        StoreConfig::InMemory => {
            info!("Using in-memory cell store (contents lost on shutdown)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ApiConfig Tests ====================

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        match config.store {
            StoreConfig::Sqlite(path) => assert_eq!(path, PathBuf::from("gridstore.db")),
            StoreConfig::InMemory => panic!("default store should be SQLite"),
        }
    }

    #[test]
    fn test_config_custom_values() {
        let config = ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            store: StoreConfig::InMemory,
        };
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(matches!(config.store, StoreConfig::InMemory));
    }

    #[test]
    fn test_config_clone() {
        let config1 = ApiConfig::default();
        let config2 = config1.clone();
        assert_eq!(config1.host, config2.host);
        assert_eq!(config1.port, config2.port);
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig {
            host: "192.168.1.100".to_string(),
            port: 9090,
            store: StoreConfig::InMemory,
        };
        let addr_str = format!("{}:{}", config.host, config.port);
        assert_eq!(addr_str, "192.168.1.100:9090");

        // Verify it parses to SocketAddr
        let addr: SocketAddr = addr_str.parse().unwrap();
        assert_eq!(addr.port(), 9090);
    }

    // ==================== AppState Tests ====================

    #[test]
    fn test_app_state_new() {
        let state = AppState::new("0.1.0", Arc::new(MemoryStore::new()));
        assert_eq!(state.version, "0.1.0");
    }

    #[test]
    fn test_app_state_clone() {
        let state1 = AppState::new("0.1.0", Arc::new(MemoryStore::new()));
        let state2 = state1.clone();
        assert_eq!(state1.version, state2.version);
    }

    #[test]
    fn test_app_state_in_arc() {
        let state = Arc::new(AppState::new("0.1.0", Arc::new(MemoryStore::new())));
        let state_clone = Arc::clone(&state);
        assert_eq!(state.version, state_clone.version);
        assert_eq!(Arc::strong_count(&state), 2);
    }

    // ==================== Store Opening Tests ====================

    #[test]
    fn test_open_store_in_memory() {
        let store = open_store(&StoreConfig::InMemory);
        assert!(store.is_ok());
    }

    #[test]
    fn test_open_store_sqlite_bad_path() {
        let config = StoreConfig::Sqlite(PathBuf::from("/nonexistent-dir/sub/cells.db"));
        assert!(open_store(&config).is_err());
    }
}
