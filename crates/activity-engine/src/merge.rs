//! Merge raw intervals into a sorted, strictly disjoint cover.
//!
//! Sorts by start time, then sweeps once, folding every interval that starts
//! at or before the end of the current accumulator into it. Touching intervals
//! (`next.start == current.end`) are merged, so consecutive outputs are always
//! separated by a gap of positive length.

use serde::Serialize;

use crate::interval::Interval;

/// A sorted sequence of intervals where each ends strictly before the next
/// one starts.
///
/// Only [`merge`] produces values of this type, so every instance upholds the
/// ordering and disjointness invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergedIntervals(Vec<Interval>);

impl MergedIntervals {
    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Interval> {
        self.0
    }
}

impl<'a> IntoIterator for &'a MergedIntervals {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Merge overlapping or touching intervals.
///
/// Input may be empty, unordered, and overlapping. The result covers exactly
/// the same instants as the input.
pub fn merge(intervals: &[Interval]) -> MergedIntervals {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|iv| (iv.start(), iv.end()));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start() <= last.end() {
                last.extend_to(interval.end());
                continue;
            }
        }
        merged.push(interval);
    }

    MergedIntervals(merged)
}

/// Flatten several merged sets and merge them again.
///
/// Sets that are disjoint individually can still overlap each other, so the
/// union has to go through [`merge`] once more.
pub fn merge_all(sets: &[MergedIntervals]) -> MergedIntervals {
    let flattened: Vec<Interval> = sets.iter().flat_map(|set| set.iter().copied()).collect();
    merge(&flattened)
}
