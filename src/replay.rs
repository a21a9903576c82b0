//! Event replay from newline-delimited JSON
//!
//! Each line holds one record, `{"event": "tool:pre", "data": {...}}`. Records
//! are emitted through an [`EventRouter`] in file order.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::hooks::EventRouter;

/// A single recorded event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventRecord {
    /// Event name, e.g. `content_block:start`
    pub event: String,
    /// Event payload
    #[serde(default)]
    pub data: Value,
}

/// Counts from a replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Records emitted to the router
    pub emitted: usize,
    /// Non-blank lines that could not be decoded
    pub skipped: usize,
}

/// Parse a single line into an `EventRecord`.
///
/// Returns `None` for blank lines, invalid JSON, or records without a string
/// `event` field.
#[must_use]
pub fn parse_record(line: &str) -> Option<EventRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    serde_json::from_str(line).ok()
}

/// Emit every record read from `reader` through `router`.
pub async fn replay<R>(reader: R, router: &mut EventRouter) -> Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut stats = ReplayStats::default();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read event stream")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(&line) {
            Some(record) => {
                router.emit(&record.event, &record.data);
                stats.emitted += 1;
            }
            None => {
                warn!(line = line_no, "skipping undecodable event record");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}
