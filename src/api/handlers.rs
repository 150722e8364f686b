//! API request handlers
//!
//! Handlers for all REST API endpoints. The cell endpoints use the wire
//! shapes the front-end expects: a processed batch answers with
//! `{message, modifiedCount, upsertedCount}`, a failed call answers with
//! `{message, error}` and a 500 status, and list-all answers with a bare
//! array of cell records.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::error::GridError;
use crate::types::{CellRecord, ProposedCell};

use super::server::AppState;

/// Failed call: wraps the store error with the endpoint's message and maps
/// onto a 500 response carrying the `{message, error}` body.
#[derive(Debug)]
pub struct ApiError {
    message: &'static str,
    source: GridError,
}

impl ApiError {
    fn new(message: &'static str, source: GridError) -> Self {
        Self { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message.to_string(),
            error: self.source.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Wire shape of a failed call
#[derive(Debug, Serialize, Default)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

/// Wire shape of a processed update batch
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCellsResponse {
    pub message: String,
    pub modified_count: u64,
    pub upserted_count: u64,
}

/// Root endpoint response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

/// Version response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Gridstore API Server".to_string(),
        version: state.version.clone(),
        description: "Cell persistence backend for browser spreadsheets".to_string(),
        endpoints: vec![
            EndpointInfo {
                path: "/health".to_string(),
                method: "GET".to_string(),
                description: "Health check endpoint (probes the cell store)".to_string(),
            },
            EndpointInfo {
                path: "/version".to_string(),
                method: "GET".to_string(),
                description: "Get server version".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/cells".to_string(),
                method: "POST".to_string(),
                description: "Submit a batch of cell updates".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/cells".to_string(),
                method: "GET".to_string(),
                description: "List every stored cell".to_string(),
            },
        ],
    };
    Json(response)
}

/// GET /health - Health check, probes the cell store
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                store: "reachable".to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded".to_string(),
                store: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(VersionResponse {
        version: state.version.clone(),
        features: vec!["update_cells".to_string(), "list_cells".to_string()],
    })
}

/// POST /api/v1/cells - Submit a batch of cell updates
///
/// Malformed entries are skipped and never counted. A store failure fails
/// the whole call; entries applied before the failure stay applied.
pub async fn update_cells(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<ProposedCell>>,
) -> Result<Json<UpdateCellsResponse>, ApiError> {
    debug!(entries = batch.len(), "received cell update batch");

    let summary = state
        .reconciler
        .reconcile(batch)
        .await
        .map_err(|e| ApiError::new("Failed to save cells", e))?;

    Ok(Json(UpdateCellsResponse {
        message: "Cells saved".to_string(),
        modified_count: summary.modified_count,
        upserted_count: summary.upserted_count,
    }))
}

/// GET /api/v1/cells - List every stored cell record
pub async fn list_cells(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CellRecord>>, ApiError> {
    let records = state
        .reconciler
        .list_all()
        .await
        .map_err(|e| ApiError::new("Failed to fetch cells", e))?;
    Ok(Json(records))
}
