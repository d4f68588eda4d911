use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Body of the JSON health and readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

/// Handler for `GET /healthz`: bare liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`: bare readiness check (services with a store
/// expose their own dependency-aware probe as well).
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /health`: liveness as `{"status":"ok"}`.
pub async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}
