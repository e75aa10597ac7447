//! Severity histogram

use serde::Serialize;
use std::ops::RangeInclusive;

use crate::feed::Complaint;

/// Severity levels the histogram has buckets for
pub const SEVERITY_LEVELS: RangeInclusive<i64> = 1..=5;

/// Number of complaints filed at one severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityBucket {
    pub severity: i64,
    pub count: usize,
}

/// One bucket per level 1 through 5, in order.
///
/// Severities outside 1-5 land in no bucket.
pub fn severity_histogram(complaints: &[Complaint]) -> [SeverityBucket; 5] {
    std::array::from_fn(|i| {
        let level = *SEVERITY_LEVELS.start() + i as i64;
        SeverityBucket {
            severity: level,
            count: complaints.iter().filter(|c| c.severity == level).count(),
        }
    })
}

/// Complaints whose severity falls outside the histogram range
pub fn out_of_range_count(complaints: &[Complaint]) -> usize {
    complaints
        .iter()
        .filter(|c| !SEVERITY_LEVELS.contains(&c.severity))
        .count()
}
