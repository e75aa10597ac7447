//! Complaint timing heatmap
//!
//! Two views of when complaints were filed:
//! - `heatmap_points`: one point per complaint, weighted by severity.
//!   Complaints in the same hour/day cell overlap rather than merge.
//! - `heatmap_cells`: a true count grid, one entry per non-empty cell.

use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::feed::{Complaint, DisplayZone};

/// Weekdays in grid order
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One complaint placed on the hour/day plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapPoint {
    /// Calendar hour, 0-23
    pub hour: u32,
    /// Weekday name, e.g. "Friday"
    pub day: &'static str,
    /// Point weight, the complaint's severity
    pub value: i64,
}

/// Aggregated hour/day cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub day: &'static str,
    pub hour: u32,
    pub count: usize,
    pub total_severity: i64,
}

/// Place a single complaint. None when its timestamp does not parse.
pub fn heatmap_point(complaint: &Complaint, zone: DisplayZone) -> Option<HeatmapPoint> {
    let filed = complaint.filed_at(zone)?;
    Some(HeatmapPoint {
        hour: filed.hour(),
        day: weekday_name(filed.weekday()),
        value: complaint.severity,
    })
}

/// One point per complaint with a readable timestamp, in input order
pub fn heatmap_points(complaints: &[Complaint], zone: DisplayZone) -> Vec<HeatmapPoint> {
    let points: Vec<HeatmapPoint> = complaints
        .iter()
        .filter_map(|c| heatmap_point(c, zone))
        .collect();

    let skipped = complaints.len() - points.len();
    if skipped > 0 {
        tracing::debug!(skipped, "Complaints without a readable date left off the heatmap");
    }

    points
}

/// Count grid ordered Monday→Sunday, then by hour. Empty cells are omitted.
pub fn heatmap_cells(complaints: &[Complaint], zone: DisplayZone) -> Vec<HeatmapCell> {
    let mut grid: BTreeMap<(u32, u32), (usize, i64)> = BTreeMap::new();

    for complaint in complaints {
        let Some(filed) = complaint.filed_at(zone) else {
            continue;
        };
        let key = (filed.weekday().num_days_from_monday(), filed.hour());
        let entry = grid.entry(key).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(complaint.severity);
    }

    grid.into_iter()
        .map(|((day, hour), (count, total_severity))| HeatmapCell {
            day: weekday_name(WEEKDAYS[day as usize]),
            hour,
            count,
            total_severity,
        })
        .collect()
}
