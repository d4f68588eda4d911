use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use eloquia_core::health::StatusBody;

use crate::state::AppState;

// ── GET /ready ───────────────────────────────────────────────────────────────

/// Readiness including a store round-trip.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(StatusBody { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusBody {
                    status: "unavailable",
                }),
            )
        }
    }
}
