use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "print-quote",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// The cost model is validated before the listener binds, so a running
/// server is always ready
pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "ready",
        "service": "print-quote",
    })))
}
