//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (initial fetch has settled)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::feed::FeedPhase;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Ready once the initial fetch has finished, whatever its outcome. A failed
/// fetch is terminal, so waiting longer would not change anything.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.feed.read().await.is_settled() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with feed phase.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let phase = state.feed.read().await.phase();

    let status = match phase {
        FeedPhase::Loaded => "healthy",
        FeedPhase::Loading => "starting",
        FeedPhase::Failed => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        feed: phase,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
