//! Overview metrics
//!
//! The four headline numbers shown as cards. Totals and rates divide by the
//! feed's advertised `count`, not by the list length. A zero `count`
//! yields 0 instead of a non-finite value.

use serde::Serialize;

use crate::feed::{Complaint, FeedResponse};

/// Scalar summary of a complaint feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub total_complaints: u64,
    pub average_severity: f64,
    pub open_cases: usize,
    /// Percentage in [0, 100] for a consistent feed
    pub resolution_rate: f64,
}

impl OverviewMetrics {
    pub fn compute(feed: &FeedResponse) -> Self {
        Self {
            total_complaints: total_complaints(feed),
            average_severity: average_severity(feed),
            open_cases: open_cases(&feed.complaints),
            resolution_rate: resolution_rate(feed),
        }
    }

    /// One decimal, e.g. "3.2"
    pub fn average_severity_label(&self) -> String {
        format!("{:.1}", self.average_severity)
    }

    /// One decimal with a percent sign, e.g. "40.0%"
    pub fn resolution_rate_label(&self) -> String {
        format!("{:.1}%", self.resolution_rate)
    }
}

/// The server-advertised count
pub fn total_complaints(feed: &FeedResponse) -> u64 {
    feed.count
}

/// Sum of severities over the advertised count
pub fn average_severity(feed: &FeedResponse) -> f64 {
    let sum: i128 = feed.complaints.iter().map(|c| i128::from(c.severity)).sum();
    ratio(sum as f64, feed.count)
}

pub fn open_cases(complaints: &[Complaint]) -> usize {
    complaints.iter().filter(|c| c.is_open()).count()
}

/// Share of non-open complaints over the advertised count, as a percentage
pub fn resolution_rate(feed: &FeedResponse) -> f64 {
    let resolved = feed.complaints.iter().filter(|c| !c.is_open()).count();
    ratio(resolved as f64, feed.count) * 100.0
}

fn ratio(numerator: f64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator / denominator as f64
}
