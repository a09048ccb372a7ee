//! Human-readable rendering of reports and free slots.

use std::fmt::Write;

use activity_engine::{ActivityReport, FreeSlot, Interval};
use chrono::{DateTime, Utc};

/// How to print instants: time of day alone when the window sits in one
/// calendar day, otherwise date and time.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    same_day: bool,
}

impl Clock {
    pub fn for_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            same_day: start.date_naive() == end.date_naive(),
        }
    }

    fn instant(&self, t: DateTime<Utc>) -> String {
        if self.same_day {
            t.format("%H:%M").to_string()
        } else {
            t.format("%Y-%m-%d %H:%M").to_string()
        }
    }

    fn span(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        format!("{} - {}", self.instant(start), self.instant(end))
    }
}

fn session(interval: &Interval) -> String {
    let start = interval.start();
    let end = interval.end();
    if start.date_naive() == end.date_naive() {
        format!("{} - {}", start.format("%Y-%m-%d %H:%M"), end.format("%H:%M"))
    } else {
        format!(
            "{} - {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Per-user sections followed by the global free slots.
pub fn report_text(report: &ActivityReport) -> String {
    let clock = Clock::for_window(report.window_start, report.window_end);
    let mut out = String::new();

    for user in &report.users {
        let _ = writeln!(out, "User {}:", user.user_id);
        if user.merged.is_empty() {
            let _ = writeln!(out, "  Merged sessions: none");
        } else {
            let _ = writeln!(out, "  Merged sessions:");
            for interval in &user.merged {
                let _ = writeln!(out, "    {}", session(interval));
            }
        }
        let _ = writeln!(
            out,
            "  Total active time: {} minutes",
            user.summary.total_minutes
        );
        let _ = writeln!(
            out,
            "  Average session length: {:.2} minutes",
            user.summary.average_session_minutes
        );
        out.push('\n');
    }

    out.push_str("Global free slots:\n");
    out.push_str(&slots_text(&report.free, clock));
    out
}

/// One `start - end` line per slot, or a single `none` line.
pub fn slots_text(slots: &[FreeSlot], clock: Clock) -> String {
    if slots.is_empty() {
        return "  none\n".to_string();
    }
    let mut out = String::new();
    for slot in slots {
        let _ = writeln!(
            out,
            "  {} ({} min)",
            clock.span(slot.start, slot.end),
            slot.duration_minutes
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, day, hour, min, 0).unwrap()
    }

    #[test]
    fn same_day_window_prints_time_only() {
        let clock = Clock::for_window(at(1, 9, 0), at(1, 17, 0));
        assert_eq!(clock.span(at(1, 11, 0), at(1, 13, 0)), "11:00 - 13:00");
    }

    #[test]
    fn multi_day_window_prints_dates() {
        let clock = Clock::for_window(at(1, 9, 0), at(2, 17, 0));
        assert_eq!(
            clock.span(at(1, 11, 0), at(2, 9, 0)),
            "2025-10-01 11:00 - 2025-10-02 09:00"
        );
    }

    #[test]
    fn empty_slot_list_prints_none() {
        let clock = Clock::for_window(at(1, 9, 0), at(1, 17, 0));
        assert_eq!(slots_text(&[], clock), "  none\n");
    }

    #[test]
    fn overnight_session_prints_both_dates() {
        let interval = Interval::new(at(1, 23, 0), at(2, 1, 0)).unwrap();
        assert_eq!(session(&interval), "2025-10-01 23:00 - 2025-10-02 01:00");
    }
}
