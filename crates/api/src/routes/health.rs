use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Active search strategy.
    pub search: &'static str,
    /// Whether the store is reachable. Always `true` for the memory store.
    pub db_healthy: bool,
}

/// GET /health -- returns service and store health.
///
/// Probing the database opens the lazy pool if no request has yet.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match &state.db {
        Some(lazy) => match lazy.get().await {
            Ok(pool) => marquee_db::health_check(pool).await.is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Database unreachable during health check");
                false
            }
        },
        None => true,
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        search: state.search.kind().as_str(),
        db_healthy,
    })
}

/// Mount health check routes (intended for root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
