//! Health check handler

use axum::Json;

use crate::web::responses::HealthResponse;

/// Liveness probe; does not touch the playlist origin
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
