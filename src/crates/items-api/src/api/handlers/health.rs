//! Health check endpoint handler

use axum::Json;

use crate::api::models::HealthResponse;

/// Handler for GET /health
///
/// Reports that the process is serving. The data store is not consulted.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}
