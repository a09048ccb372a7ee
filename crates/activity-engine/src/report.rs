//! Run the whole pipeline: per-user merge and usage, then global free time.
//!
//! This is what an output consumer calls once it holds parsed users and a
//! work window. Each user is processed independently; the global busy/free
//! computation runs after every user has been merged.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::freebusy::{self, BusyBlock, FreeSlot};
use crate::interval::Interval;
use crate::merge::{merge, MergedIntervals};
use crate::usage::{self, UsageSummary};

/// One user's raw, unmerged sessions.
#[derive(Debug, Clone)]
pub struct UserActivity {
    /// Opaque user identifier as supplied by the caller.
    pub user_id: String,
    pub sessions: Vec<Interval>,
}

/// Merged sessions and usage figures for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    pub user_id: String,
    pub merged: MergedIntervals,
    #[serde(flatten)]
    pub summary: UsageSummary,
}

/// Result of analyzing every user against a work window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityReport {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Per-user results, in input order.
    pub users: Vec<UserReport>,
    /// Global busy blocks inside the window.
    pub busy: Vec<BusyBlock>,
    /// Global free slots inside the window.
    pub free: Vec<FreeSlot>,
}

/// Analyze `users` against `window`.
pub fn analyze(users: &[UserActivity], window: &Interval) -> ActivityReport {
    let reports: Vec<UserReport> = users
        .iter()
        .map(|user| {
            let merged = merge(&user.sessions);
            tracing::debug!(
                user_id = %user.user_id,
                raw = user.sessions.len(),
                merged = merged.len(),
                "merged user sessions"
            );
            let summary = usage::summarize(&merged);
            UserReport {
                user_id: user.user_id.clone(),
                merged,
                summary,
            }
        })
        .collect();

    let merged_sets: Vec<MergedIntervals> = reports.iter().map(|r| r.merged.clone()).collect();
    let busy = freebusy::find_busy_blocks(&merged_sets, window);
    let free = freebusy::find_free_slots(&merged_sets, window);
    tracing::debug!(
        busy = busy.len(),
        free = free.len(),
        "computed global availability"
    );

    ActivityReport {
        window_start: window.start(),
        window_end: window.end(),
        users: reports,
        busy,
        free,
    }
}
