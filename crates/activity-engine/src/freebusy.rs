//! Compute global free slots and busy blocks across every user.
//!
//! All users' merged sessions are merged again into one busy set, clipped to
//! the work window, then the gaps between busy periods are reported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::merge::{merge, merge_all, MergedIntervals};

/// A period inside the work window during which no user is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// A globally merged busy period inside the work window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Number of users with at least one session overlapping this block.
    pub active_users: usize,
}

/// Union of every user's sessions, clipped to `window`.
///
/// Sessions entirely outside the window are dropped; sessions straddling a
/// bound are cut at it. Returns an empty set for an empty window.
fn global_busy(users: &[MergedIntervals], window: &Interval) -> MergedIntervals {
    if window.start() >= window.end() {
        return MergedIntervals::default();
    }
    let clipped: Vec<Interval> = merge_all(users)
        .iter()
        .filter_map(|iv| iv.clip_to(window))
        .collect();
    merge(&clipped)
}

/// Find the periods of `window` during which none of `users` is active.
///
/// Free slots are sorted by start, disjoint, and each has positive length.
/// An empty or zero-length window yields no slots.
pub fn find_free_slots(users: &[MergedIntervals], window: &Interval) -> Vec<FreeSlot> {
    if window.start() >= window.end() {
        return Vec::new();
    }

    let busy = global_busy(users, window);

    let mut free_slots = Vec::new();
    let mut cursor = window.start();

    for interval in &busy {
        if interval.start() > cursor {
            free_slots.push(FreeSlot::between(cursor, interval.start()));
        }
        cursor = cursor.max(interval.end());
    }

    // Trailing free slot after the last busy period.
    if cursor < window.end() {
        free_slots.push(FreeSlot::between(cursor, window.end()));
    }

    free_slots
}

/// Find the first free slot of at least `min_duration_minutes`.
pub fn find_first_free_slot(
    users: &[MergedIntervals],
    window: &Interval,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(users, window)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}

/// Busy blocks inside `window`, each tagged with how many users overlap it.
pub fn find_busy_blocks(users: &[MergedIntervals], window: &Interval) -> Vec<BusyBlock> {
    global_busy(users, window)
        .iter()
        .map(|block| {
            let active_users = users
                .iter()
                .filter(|sessions| {
                    sessions
                        .iter()
                        .filter_map(|iv| iv.clip_to(window))
                        .any(|iv| iv.overlaps(block))
                })
                .count();
            BusyBlock {
                start: block.start(),
                end: block.end(),
                active_users,
            }
        })
        .collect()
}
