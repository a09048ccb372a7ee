//! Tests for interval validation and merging.

use activity_engine::error::ActivityError;
use activity_engine::interval::Interval;
use activity_engine::merge::{merge, merge_all};
use chrono::{DateTime, TimeZone, Utc};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, hour, min, 0).unwrap()
}

fn iv(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(at(start_hour, start_min), at(end_hour, end_min)).unwrap()
}

// ── Interval ────────────────────────────────────────────────────────────────

#[test]
fn inverted_interval_is_rejected() {
    let err = Interval::new(at(11, 0), at(10, 0)).unwrap_err();
    assert_eq!(
        err,
        ActivityError::InvalidInterval {
            start: at(11, 0),
            end: at(10, 0),
        }
    );
}

#[test]
fn degenerate_interval_is_valid_and_zero_length() {
    let point = Interval::new(at(9, 0), at(9, 0)).unwrap();
    assert_eq!(point.duration_minutes(), 0);
}

#[test]
fn duration_minutes_truncates_seconds() {
    let start = at(9, 0);
    let end = Utc.with_ymd_and_hms(2025, 10, 1, 9, 1, 59).unwrap();
    let interval = Interval::new(start, end).unwrap();
    assert_eq!(interval.duration_minutes(), 1);
}

#[test]
fn deserializing_inverted_interval_fails() {
    let json = r#"{"start":"2025-10-01T11:00:00Z","end":"2025-10-01T10:00:00Z"}"#;
    let result: Result<Interval, _> = serde_json::from_str(json);
    assert!(result.is_err(), "inverted bounds must not deserialize");
}

#[test]
fn interval_serializes_as_start_end_object() {
    let json = serde_json::to_value(iv(9, 0, 10, 0)).unwrap();
    assert_eq!(json["start"], "2025-10-01T09:00:00Z");
    assert_eq!(json["end"], "2025-10-01T10:00:00Z");
}

// ── merge ───────────────────────────────────────────────────────────────────

#[test]
fn empty_input_merges_to_empty() {
    assert!(merge(&[]).is_empty());
}

#[test]
fn overlapping_sessions_merge() {
    // User 1 of the sample dataset.
    let merged = merge(&[iv(9, 0, 10, 30), iv(10, 15, 11, 0), iv(13, 0, 14, 0)]);
    assert_eq!(merged.as_slice(), &[iv(9, 0, 11, 0), iv(13, 0, 14, 0)]);
}

#[test]
fn disjoint_sessions_are_kept() {
    // User 2 of the sample dataset.
    let merged = merge(&[iv(9, 45, 10, 15), iv(15, 0, 15, 30)]);
    assert_eq!(merged.as_slice(), &[iv(9, 45, 10, 15), iv(15, 0, 15, 30)]);
}

#[test]
fn touching_sessions_merge() {
    let merged = merge(&[iv(9, 0, 10, 0), iv(10, 0, 11, 0)]);
    assert_eq!(merged.as_slice(), &[iv(9, 0, 11, 0)]);
}

#[test]
fn unordered_input_is_sorted() {
    let merged = merge(&[iv(14, 0, 15, 0), iv(8, 0, 9, 0), iv(11, 0, 12, 0)]);
    assert_eq!(
        merged.as_slice(),
        &[iv(8, 0, 9, 0), iv(11, 0, 12, 0), iv(14, 0, 15, 0)]
    );
}

#[test]
fn contained_session_is_absorbed() {
    let merged = merge(&[iv(9, 0, 17, 0), iv(10, 0, 11, 0)]);
    assert_eq!(merged.as_slice(), &[iv(9, 0, 17, 0)]);
}

#[test]
fn degenerate_session_inside_another_is_absorbed() {
    let merged = merge(&[iv(9, 0, 10, 0), iv(9, 30, 9, 30)]);
    assert_eq!(merged.as_slice(), &[iv(9, 0, 10, 0)]);
}

#[test]
fn degenerate_session_alone_survives() {
    let merged = merge(&[iv(12, 0, 12, 0)]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.as_slice()[0].duration_minutes(), 0);
}

#[test]
fn merge_all_unions_sets_from_different_users() {
    let user_1 = merge(&[iv(9, 0, 10, 30), iv(10, 15, 11, 0), iv(13, 0, 14, 0)]);
    let user_2 = merge(&[iv(9, 45, 10, 15), iv(15, 0, 15, 30)]);

    let global = merge_all(&[user_1, user_2]);

    assert_eq!(
        global.as_slice(),
        &[iv(9, 0, 11, 0), iv(13, 0, 14, 0), iv(15, 0, 15, 30)]
    );
}

#[test]
fn merged_set_serializes_as_plain_array() {
    let merged = merge(&[iv(9, 0, 10, 0)]);
    let json = serde_json::to_value(&merged).unwrap();
    assert!(json.is_array());
    assert_eq!(json.as_array().unwrap().len(), 1);
}
