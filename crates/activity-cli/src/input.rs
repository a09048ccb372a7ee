//! Parse the users/sessions JSON document into engine types.

use std::fmt;

use activity_engine::{Interval, UserActivity};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UsersDocument {
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: UserId,
    #[serde(default)]
    sessions: Vec<SessionRecord>,
}

/// User ids appear as either JSON numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionRecord {
    start: String,
    end: String,
}

/// Parse a timestamp into UTC.
///
/// Accepts RFC 3339 (any offset, converted to UTC) or a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, which is taken to already be UTC. A space may
/// replace the `T`.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    anyhow::bail!(
        "Invalid timestamp: '{}'. Expected RFC 3339 or YYYY-MM-DDTHH:MM:SS",
        raw
    )
}

/// Parse the users document into one [`UserActivity`] per user, in order.
pub fn parse_users(json: &str) -> Result<Vec<UserActivity>> {
    let document: UsersDocument =
        serde_json::from_str(json).context("Failed to parse users document")?;

    document
        .users
        .into_iter()
        .map(|user| -> Result<UserActivity> {
            let user_id = user.id.to_string();
            let sessions = user
                .sessions
                .iter()
                .enumerate()
                .map(|(index, session)| {
                    parse_session(session).with_context(|| {
                        format!("Invalid session #{} for user {}", index + 1, user_id)
                    })
                })
                .collect::<Result<Vec<Interval>>>()?;
            tracing::debug!(user_id = %user_id, sessions = sessions.len(), "parsed user");
            Ok(UserActivity { user_id, sessions })
        })
        .collect()
}

fn parse_session(session: &SessionRecord) -> Result<Interval> {
    let start = parse_timestamp(&session.start)?;
    let end = parse_timestamp(&session.end)?;
    Ok(Interval::new(start, end)?)
}

/// Build the work window from its two bounds.
pub fn parse_window(start: &str, end: &str) -> Result<Interval> {
    let start = parse_timestamp(start).context("Invalid --window-start")?;
    let end = parse_timestamp(end).context("Invalid --window-end")?;
    Interval::new(start, end).context("Work window must not end before it starts")
}
