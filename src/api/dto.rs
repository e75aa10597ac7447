//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Aggregate payloads reuse the serializable types from [`crate::aggregate`].

use serde::{Deserialize, Serialize};

use crate::aggregate::{HeatmapCell, HeatmapPoint};
use crate::feed::FeedPhase;

// ============================================
// QUERY DTOs
// ============================================

/// Which heatmap representation to return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapMode {
    /// One point per complaint
    #[default]
    Points,
    /// One entry per non-empty hour/day cell
    Cells,
}

/// Query string for GET /api/v1/heatmap
#[derive(Debug, Default, Deserialize)]
pub struct HeatmapQuery {
    #[serde(default)]
    pub mode: HeatmapMode,
}

/// Query string for GET /api/v1/complaints
#[derive(Debug, Deserialize)]
pub struct ComplaintsQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: usize,
    /// Complaint ids to flag as selected, comma-separated
    #[serde(default)]
    pub selected: Option<String>,
}

fn default_page() -> usize {
    1
}

// ============================================
// RESPONSE DTOs
// ============================================

/// Heatmap response, shape depends on the requested mode
#[derive(Debug, Serialize)]
#[serde(tag = "mode", content = "data", rename_all = "lowercase")]
pub enum HeatmapResponse {
    Points(Vec<HeatmapPoint>),
    Cells(Vec<HeatmapCell>),
}

/// Feed lifecycle status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: FeedPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<usize>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub feed: FeedPhase,
    pub uptime_seconds: u64,
    pub version: String,
}
