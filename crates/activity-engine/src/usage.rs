//! Per-user usage statistics over a merged interval set.

use serde::{Deserialize, Serialize};

use crate::merge::MergedIntervals;

/// Usage figures for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Number of merged sessions.
    pub session_count: usize,
    /// Sum of whole minutes per merged session.
    pub total_minutes: i64,
    /// `total_minutes / session_count`, or `0.0` with no sessions.
    pub average_session_minutes: f64,
}

/// Total active time in minutes.
///
/// Each interval is truncated to whole minutes before summing, so three
/// 90-second sessions total 3 minutes, not 4.
pub fn total_minutes(merged: &MergedIntervals) -> i64 {
    merged.iter().map(|iv| iv.duration_minutes()).sum()
}

/// Mean merged session length in minutes. Empty input yields `0.0`.
pub fn average_session_minutes(merged: &MergedIntervals) -> f64 {
    if merged.is_empty() {
        return 0.0;
    }
    total_minutes(merged) as f64 / merged.len() as f64
}

pub fn summarize(merged: &MergedIntervals) -> UsageSummary {
    UsageSummary {
        session_count: merged.len(),
        total_minutes: total_minutes(merged),
        average_session_minutes: average_session_minutes(merged),
    }
}
