//! Liveness and database reachability for load balancers and uptime checks.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answered, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Round-trip time of `SELECT 1` in milliseconds.
    pub latency_ms: u128,
}

/// GET /health
///
/// 503 while the database is unreachable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let result = flashdeck_db::health_check(&state.pool).await;
    let latency_ms = started.elapsed().as_millis();

    if let Err(err) = &result {
        tracing::warn!(error = %err, "Health check could not reach the database");
    }

    let (code, status) = match result {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "degraded"),
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable: code == StatusCode::OK,
            latency_ms,
        },
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1` and without authentication.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
