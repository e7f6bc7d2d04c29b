//! Health endpoints
//!
//! Liveness answers as long as the process runs; readiness additionally
//! pings the database.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use gig_db::Database;
use serde::Serialize;

pub struct HealthState {
    pub db: Database,
    pub start_time: Instant,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /health
pub async fn health(
    State(state): State<Arc<HealthState>>,
) -> (StatusCode, Json<HealthReport>) {
    let db_ok = state.db.ping().await.is_ok();

    let report = HealthReport {
        status: if db_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database: if db_ok { "up" } else { "down" },
        timestamp: chrono::Utc::now(),
    };

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

/// GET /health/live
pub async fn liveness() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "alive" })))
}

/// GET /health/ready
pub async fn readiness(State(state): State<Arc<HealthState>>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
