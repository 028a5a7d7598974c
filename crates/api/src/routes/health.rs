//! Liveness and database reachability at `/health`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the pool answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Always answers 200 so load balancers can tell a slow database from a
/// dead process; callers read `db_healthy` for the rest.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = sesiones_db::health_check(&state.pool)
        .await
        .inspect_err(|err| tracing::warn!(error = %err, "Database health check failed"))
        .is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mounted by [`crate::router::build_app_router`] outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
