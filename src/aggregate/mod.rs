//! Complaint aggregations
//!
//! Pure functions reshaping a flat complaint list into chart-ready values.
//! Nothing here caches or mutates: every call recomputes from the list, and
//! every function accepts an empty list.
//!
//! - [`severity_histogram`]: five buckets, severity 1-5
//! - [`meal_type_distribution`]: four fixed meal categories
//! - [`heatmap_points`] / [`heatmap_cells`]: hour/day placement
//! - [`OverviewMetrics`]: total, average severity, open cases, resolution rate

mod heatmap;
mod meal;
mod overview;
mod severity;

pub use heatmap::{
    heatmap_cells, heatmap_point, heatmap_points, weekday_name, HeatmapCell, HeatmapPoint, WEEKDAYS,
};
pub use meal::{known_meal_total, meal_type_distribution, MealSlice};
pub use overview::{
    average_severity, open_cases, resolution_rate, total_complaints, OverviewMetrics,
};
pub use severity::{out_of_range_count, severity_histogram, SeverityBucket, SEVERITY_LEVELS};

use serde::Serialize;

use crate::feed::{DisplayZone, FeedResponse};

/// Every aggregate the dashboard shows, computed from one feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub overview: OverviewMetrics,
    pub severity: [SeverityBucket; 5],
    pub meal_types: [MealSlice; 4],
    pub heatmap: Vec<HeatmapCell>,
}

impl DashboardSnapshot {
    pub fn build(feed: &FeedResponse, zone: DisplayZone) -> Self {
        Self {
            overview: OverviewMetrics::compute(feed),
            severity: severity_histogram(&feed.complaints),
            meal_types: meal_type_distribution(&feed.complaints),
            heatmap: heatmap_cells(&feed.complaints, zone),
        }
    }
}
