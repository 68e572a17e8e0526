use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::debug;

/// Liveness only; the record store is not probed
pub async fn health() -> impl IntoResponse {
    debug!("GET /api/health");
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
