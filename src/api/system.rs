use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::{AppState, HealthResponse};

/// GET /health
///
/// Unauthenticated; reports 503 when the database does not answer.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.storage().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check database ping failed: {e:#}");
            false
        }
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if database { "ok" } else { "degraded" },
            database,
            uptime_secs: state.start_time.elapsed().as_secs(),
        }),
    )
}
