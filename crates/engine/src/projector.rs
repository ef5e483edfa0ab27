// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown projection: read-only queries over both schedulers' state.
//!
//! Everything here is a pure function of a snapshot and "now". Callers may
//! poll at arbitrary frequency (the daemon's watch connections poll at
//! 250 ms); nothing advances or mutates an anchor or due instant.

use crate::{AlarmScheduler, IntervalScheduler};
use chime_core::time_fmt::{format_alarm_countdown, format_min_sec, format_wall_time};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The nearest upcoming event of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    /// Schedule value (period minutes or offset minutes).
    pub value: u32,
    /// Time remaining until it fires.
    pub remaining: Duration,
    /// Absolute local wall-clock instant it fires at.
    pub fire_at: NaiveDateTime,
}

/// Formatted snapshot for a presentation sink (menu, status line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Countdown line for the nearest interval timer, if any is enabled.
    pub interval_line: Option<String>,
    /// Countdown line for the nearest alarm, if any is enabled.
    pub alarm_line: Option<String>,
    /// Enabled interval periods, ascending.
    pub checked_intervals: Vec<u32>,
    /// Enabled alarm offsets, ascending.
    pub checked_alarm_offsets: Vec<u32>,
}

/// Nearest upcoming interval fire, or `None` when no interval is enabled.
///
/// The absolute fire instant is projected onto the wall clock from the
/// monotonic remaining time.
pub fn next_interval_countdown(
    intervals: &IntervalScheduler,
    now: Instant,
    now_local: NaiveDateTime,
) -> Option<Countdown> {
    let (value, remaining) = intervals.nearest(now)?;
    let fire_at = chrono::Duration::from_std(remaining)
        .ok()
        .and_then(|d| now_local.checked_add_signed(d))?;
    Some(Countdown {
        value,
        remaining,
        fire_at,
    })
}

/// Nearest upcoming alarm fire, or `None` when no alarm is enabled.
pub fn next_alarm_countdown(
    alarms: &AlarmScheduler,
    now_local: NaiveDateTime,
) -> Option<Countdown> {
    let (value, fire_at) = alarms.nearest()?;
    let remaining = fire_at
        .signed_duration_since(now_local)
        .to_std()
        .unwrap_or(Duration::ZERO);
    Some(Countdown {
        value,
        remaining,
        fire_at,
    })
}

/// Build the formatted display snapshot for both kinds.
pub fn display_state(
    intervals: &IntervalScheduler,
    alarms: &AlarmScheduler,
    now: Instant,
    now_local: NaiveDateTime,
) -> DisplayState {
    let interval_line = next_interval_countdown(intervals, now, now_local).map(|c| {
        format!(
            "{} (at {})",
            format_min_sec(c.remaining),
            format_wall_time(c.fire_at)
        )
    });
    let alarm_line = next_alarm_countdown(alarms, now_local).map(|c| {
        format!(
            "{} (at {})",
            format_alarm_countdown(c.remaining),
            format_wall_time(c.fire_at)
        )
    });

    DisplayState {
        interval_line,
        alarm_line,
        checked_intervals: intervals.enabled_periods(),
        checked_alarm_offsets: alarms.enabled_offsets(),
    }
}

#[cfg(test)]
#[path = "projector_tests.rs"]
mod tests;
