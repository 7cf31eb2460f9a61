//! CLI command implementations
//!
//! This module contains the implementation of all CLI subcommands, plus the
//! small formatting helpers they share.

pub mod add;
pub mod code;
pub mod list;

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use oathcode_core::types::{Code, CredentialWithCode};

/// Current time in milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Render a millisecond timestamp in local time
fn format_instant(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Describe how long a code stays valid
pub fn describe_validity(code: &Code, now_ms: u64) -> String {
    match code.remaining_ms(now_ms) {
        Some(remaining) => format!(
            "valid until {} ({}s left)",
            format_instant(code.valid_to),
            remaining.div_ceil(1000)
        ),
        None => "valid until next use".to_string(),
    }
}

/// One line of human readable output for a credential
pub fn format_entry(entry: &CredentialWithCode, now_ms: u64) -> String {
    let label = entry.credential.label();
    match &entry.code {
        Some(code) => format!(
            "{:<40} {:>8}  {}",
            label,
            code.expose().green().bold(),
            describe_validity(code, now_ms).dimmed()
        ),
        None => format!(
            "{:<40} {:>8}  {}",
            label,
            if entry.credential.touch_required {
                "[TOUCH]"
            } else {
                "[HOTP]"
            }
            .yellow(),
            "run `oathcode code` to generate".dimmed()
        ),
    }
}
