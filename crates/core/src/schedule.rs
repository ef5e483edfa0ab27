// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule data model: interval timers and hour-relative alarms.
//!
//! An interval schedule fires every `period_minutes` measured from a moving
//! anchor; the anchor resets to "now" on every fire, so firings missed during
//! a long suspension coalesce into a single fire instead of replaying.
//!
//! An alarm schedule fires at a fixed minute-of-hour. Its due instant is
//! always recomputed from local wall-clock rules ("the next instant strictly
//! after now whose minute equals the offset and whose second is zero"), never
//! by adding a fixed 3600 seconds, so DST shifts and clock adjustments are
//! absorbed at the next recomputation.

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;
use std::time::{Duration, Instant};

/// Largest valid alarm offset (minute-of-hour).
pub const MAX_ALARM_OFFSET: u32 = 59;

/// Validation errors for schedule values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid interval period: {0} minutes (must be positive)")]
    InvalidPeriod(u32),
    #[error("invalid alarm offset: {0} (must be a minute-of-hour in 0..=59)")]
    InvalidOffset(u32),
}

/// A repeating schedule that fires every fixed duration from a moving anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSchedule {
    /// Repeat period in minutes, always positive.
    pub period_minutes: u32,
    /// Instant from which the current period is measured.
    pub anchor: Instant,
}

impl IntervalSchedule {
    /// Create a schedule anchored at `now`.
    pub fn new(period_minutes: u32, now: Instant) -> Result<Self, ScheduleError> {
        if period_minutes == 0 {
            return Err(ScheduleError::InvalidPeriod(period_minutes));
        }
        Ok(Self {
            period_minutes,
            anchor: now,
        })
    }

    /// Full period as a [`Duration`].
    pub fn period(&self) -> Duration {
        Duration::from_secs(u64::from(self.period_minutes) * 60)
    }

    /// The unique next due instant: `anchor + period`.
    pub fn next_fire(&self) -> Instant {
        self.anchor + self.period()
    }

    /// Re-arm after a fire: the anchor moves to `now`, not `anchor + period`,
    /// so a late fire does not trigger runaway catch-up firing.
    pub fn rearm(&mut self, now: Instant) {
        self.anchor = now;
    }

    /// Time remaining until the next fire.
    ///
    /// Never zero or negative: when the due instant has already passed
    /// (overshoot, or a clock anomaly) the result clamps to the full period
    /// to avoid a degenerate instantaneous re-fire.
    pub fn time_to_next_fire(&self, now: Instant) -> Duration {
        match self.next_fire().checked_duration_since(now) {
            Some(remaining) if !remaining.is_zero() => remaining,
            _ => self.period(),
        }
    }
}

/// A one-shot-then-rearmed schedule that fires at a fixed minute-of-hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmSchedule {
    /// Minute-of-hour this alarm fires at, in `0..=59`.
    pub offset_minutes: u32,
    /// Next wall-clock instant this alarm fires, second component zero.
    pub next_fire: NaiveDateTime,
}

impl AlarmSchedule {
    /// Create a schedule armed for the next occurrence strictly after `now`.
    pub fn new(offset_minutes: u32, now: NaiveDateTime) -> Result<Self, ScheduleError> {
        let next_fire =
            next_occurrence(now, offset_minutes).ok_or(ScheduleError::InvalidOffset(offset_minutes))?;
        Ok(Self {
            offset_minutes,
            next_fire,
        })
    }

    /// Re-arm after a fire: recompute the next matching instant strictly
    /// after `now` from wall-clock rules.
    pub fn rearm(&mut self, now: NaiveDateTime) {
        if let Some(next) = next_occurrence(now, self.offset_minutes) {
            self.next_fire = next;
        }
    }

    /// Whether the alarm is due at `now`.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        now >= self.next_fire
    }

    /// Time remaining until the next fire, clamped to zero when the system
    /// clock has moved past (or backward over) the due instant.
    pub fn time_to_next_fire(&self, now: NaiveDateTime) -> Duration {
        self.next_fire
            .signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Earliest wall-clock instant strictly after `after` whose minute-of-hour
/// equals `offset_minutes` and whose second component is zero.
///
/// Returns `None` when `offset_minutes` is not a valid minute-of-hour.
pub fn next_occurrence(after: NaiveDateTime, offset_minutes: u32) -> Option<NaiveDateTime> {
    if offset_minutes > MAX_ALARM_OFFSET {
        return None;
    }
    let candidate = after
        .with_minute(offset_minutes)?
        .with_second(0)?
        .with_nanosecond(0)?;
    if candidate > after {
        Some(candidate)
    } else {
        candidate.checked_add_signed(chrono::Duration::hours(1))
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
