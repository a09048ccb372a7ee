//! `activity` CLI — merge user sessions, report usage, and find shared free time.
//!
//! ## Usage
//!
//! ```sh
//! # Full report: merged sessions and usage per user, then global free slots
//! activity report -i users.json \
//!     --window-start 2025-10-01T09:00:00 --window-end 2025-10-01T17:00:00
//!
//! # Only the free slots of at least 60 minutes, as JSON
//! activity free -i users.json --min-minutes 60 --format json \
//!     --window-start 2025-10-01T09:00:00 --window-end 2025-10-01T17:00:00
//!
//! # First free slot of at least 30 minutes, reading the document from stdin
//! cat users.json | activity free --first --min-minutes 30 \
//!     --window-start 2025-10-01T09:00:00 --window-end 2025-10-01T17:00:00
//! ```

mod input;
mod render;

use activity_engine::{merge, Interval, MergedIntervals};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::render::Clock;

#[derive(Parser)]
#[command(
    name = "activity",
    version,
    about = "Merge user activity sessions and find shared free time"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-user merged sessions and usage, followed by global free slots
    Report {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Global free slots within the work window
    Free {
        #[command(flatten)]
        common: CommonArgs,
        /// Only keep slots lasting at least this many minutes
        #[arg(long, default_value_t = 0)]
        min_minutes: i64,
        /// Print only the first matching slot
        #[arg(long)]
        first: bool,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Input users document (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Start of the work window (RFC 3339 or YYYY-MM-DDTHH:MM:SS, UTC)
    #[arg(long)]
    window_start: String,
    /// End of the work window (RFC 3339 or YYYY-MM-DDTHH:MM:SS, UTC)
    #[arg(long)]
    window_end: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match cli.command {
        Commands::Report { common } => {
            let (users, window) = load(&common)?;
            let report = activity_engine::analyze(&users, &window);
            tracing::info!(
                users = report.users.len(),
                free_slots = report.free.len(),
                "report computed"
            );

            let rendered = match common.format {
                Format::Text => render::report_text(&report),
                Format::Json => to_json(&report)?,
            };
            write_output(common.output.as_deref(), &rendered)?;
        }
        Commands::Free {
            common,
            min_minutes,
            first,
        } => {
            let (users, window) = load(&common)?;
            let merged: Vec<MergedIntervals> =
                users.iter().map(|user| merge(&user.sessions)).collect();

            let slots: Vec<activity_engine::FreeSlot> = if first {
                activity_engine::find_first_free_slot(&merged, &window, min_minutes)
                    .into_iter()
                    .collect()
            } else {
                activity_engine::find_free_slots(&merged, &window)
                    .into_iter()
                    .filter(|slot| slot.duration_minutes >= min_minutes)
                    .collect()
            };
            tracing::info!(free_slots = slots.len(), min_minutes, "free slots computed");

            let rendered = match common.format {
                Format::Text => {
                    let clock = Clock::for_window(window.start(), window.end());
                    format!("Global free slots:\n{}", render::slots_text(&slots, clock))
                }
                Format::Json if first => to_json(&slots.first())?,
                Format::Json => to_json(&slots)?,
            };
            write_output(common.output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Initialise the tracing subscriber. Logs go to stderr so reports on stdout
/// stay machine-readable.
fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn load(common: &CommonArgs) -> Result<(Vec<activity_engine::UserActivity>, Interval)> {
    let window = input::parse_window(&common.window_start, &common.window_end)?;
    let json = read_input(common.input.as_deref())?;
    let users = input::parse_users(&json)?;
    tracing::debug!(users = users.len(), "loaded users document");
    Ok((users, window))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
