//! Dashboard Routes
//!
//! Aggregates recomputed from the loaded feed on every request.
//!
//! - GET /api/v1/dashboard - All aggregates in one payload
//! - GET /api/v1/overview - Overview metrics
//! - GET /api/v1/severity - Severity histogram
//! - GET /api/v1/meal-types - Meal-type distribution
//! - GET /api/v1/heatmap?mode=points|cells - Timing heatmap
//! - GET /api/v1/status - Feed lifecycle status

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::aggregate::{
    heatmap_cells, heatmap_points, meal_type_distribution, severity_histogram,
    DashboardSnapshot, MealSlice, OverviewMetrics, SeverityBucket,
};
use crate::api::dto::{HeatmapMode, HeatmapQuery, HeatmapResponse, StatusResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardSnapshot>> {
    let zone = state.zone;
    let snapshot = state
        .with_feed(|feed| DashboardSnapshot::build(feed, zone))
        .await?;
    Ok(Json(snapshot))
}

/// GET /api/v1/overview
pub async fn get_overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<OverviewMetrics>> {
    let metrics = state.with_feed(OverviewMetrics::compute).await?;
    Ok(Json(metrics))
}

/// GET /api/v1/severity
pub async fn get_severity(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<[SeverityBucket; 5]>> {
    let histogram = state
        .with_feed(|feed| severity_histogram(&feed.complaints))
        .await?;
    Ok(Json(histogram))
}

/// GET /api/v1/meal-types
pub async fn get_meal_types(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<[MealSlice; 4]>> {
    let slices = state
        .with_feed(|feed| meal_type_distribution(&feed.complaints))
        .await?;
    Ok(Json(slices))
}

/// GET /api/v1/heatmap
///
/// Defaults to one point per complaint; `mode=cells` returns the count grid.
pub async fn get_heatmap(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeatmapQuery>,
) -> ApiResult<Json<HeatmapResponse>> {
    let zone = state.zone;
    let response = state
        .with_feed(|feed| match query.mode {
            HeatmapMode::Points => HeatmapResponse::Points(heatmap_points(&feed.complaints, zone)),
            HeatmapMode::Cells => HeatmapResponse::Cells(heatmap_cells(&feed.complaints, zone)),
        })
        .await?;
    Ok(Json(response))
}

/// GET /api/v1/status
///
/// Always 200; reports the lifecycle phase and the fetch error, if any.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let feed_state = state.feed.read().await;

    Json(StatusResponse {
        state: feed_state.phase(),
        error: feed_state.error().map(str::to_string),
        count: feed_state.feed().map(|f| f.count),
        received: feed_state.feed().map(|f| f.complaints.len()),
    })
}
