// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared countdown and wall-clock formatting.

use chrono::{NaiveDateTime, Timelike};
use std::time::Duration;

/// Format a remaining duration as `minutes:seconds`, seconds zero-padded:
/// `"0:05"`, `"23:00"`, `"90:00"`.
///
/// Minutes are not capped at 59; a 90-minute interval renders as `"90:00"`.
pub fn format_min_sec(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format an alarm countdown: `hours:minutes` when at least an hour remains
/// (`"1:05"`), otherwise `minutes:seconds` (`"23:00"`).
pub fn format_alarm_countdown(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    if secs >= 3600 {
        format!("{}:{:02}", secs / 3600, (secs % 3600) / 60)
    } else {
        format_min_sec(remaining)
    }
}

/// Format a wall-clock instant as local `hour:minute`: `"15:00"`, `"9:05"`.
pub fn format_wall_time(at: NaiveDateTime) -> String {
    format!("{}:{:02}", at.hour(), at.minute())
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
