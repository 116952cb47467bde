//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::time::Instant;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

async fn ping_database(state: &AppState) -> DatabaseHealth {
    let start = Instant::now();
    let connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    DatabaseHealth {
        connected,
        latency_ms: connected.then(|| start.elapsed().as_millis() as u64),
    }
}

/// GET /api/health
///
/// 503 when the database cannot be reached.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ping_database(&state).await;
    let status = if database.connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if database.connected { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        active_sessions: state.sessions.len(),
    };

    (status, Json(response))
}

/// GET /api/health/live
pub async fn liveness() -> Json<StatusResponse> {
    Json(StatusResponse { status: "alive" })
}

/// GET /api/health/ready
///
/// Failure shape with 503 while the database is unreachable.
pub async fn readiness(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    if ping_database(&state).await.connected {
        Ok(Json(StatusResponse { status: "ready" }))
    } else {
        Err(ApiError::ServiceUnavailable(
            "Database is not reachable".to_string(),
        ))
    }
}
