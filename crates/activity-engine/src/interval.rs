//! The closed time interval shared by every stage of the pipeline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ActivityError, Result};

/// A closed span `[start, end]` of time with `start <= end`.
///
/// Degenerate intervals (`start == end`) are valid and contribute zero
/// duration. The only way to build one is [`Interval::new`], which rejects
/// inverted bounds instead of silently normalising them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, failing with [`ActivityError::InvalidInterval`] when
    /// `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(ActivityError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes covered, truncating any leftover seconds.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_seconds().div_euclid(60)
    }

    /// True when the two intervals share at least one instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The part of this interval inside `window`, or `None` when it lies
    /// entirely outside. Merely touching a window bound counts as outside.
    pub(crate) fn clip_to(&self, window: &Interval) -> Option<Interval> {
        if self.start >= window.end || self.end <= window.start {
            return None;
        }
        Some(Interval {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        })
    }

    /// Widen the end bound. Callers guarantee `end >= self.start`.
    pub(crate) fn extend_to(&mut self, end: DateTime<Utc>) {
        self.end = self.end.max(end);
    }
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawInterval::deserialize(deserializer)?;
        Interval::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
