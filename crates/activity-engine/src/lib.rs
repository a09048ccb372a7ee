//! # activity-engine
//!
//! Interval algebra over user activity sessions.
//!
//! Given per-user lists of time-stamped sessions, the engine merges each
//! user's sessions into a disjoint cover, aggregates usage figures, and finds
//! the periods of a bounded work window during which nobody is active.
//!
//! ## Modules
//!
//! - [`interval`] — The validated `[start, end]` value type
//! - [`merge`] — Merge overlapping or touching intervals
//! - [`usage`] — Total active minutes and mean session length
//! - [`freebusy`] — Global free slots and busy blocks within a window
//! - [`report`] — Run the full pipeline over many users
//! - [`error`] — Error types

pub mod error;
pub mod freebusy;
pub mod interval;
pub mod merge;
pub mod report;
pub mod usage;

pub use error::ActivityError;
pub use freebusy::{find_busy_blocks, find_first_free_slot, find_free_slots, BusyBlock, FreeSlot};
pub use interval::Interval;
pub use merge::{merge, merge_all, MergedIntervals};
pub use report::{analyze, ActivityReport, UserActivity, UserReport};
pub use usage::{average_session_minutes, summarize, total_minutes, UsageSummary};
