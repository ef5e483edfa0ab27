// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval timer scheduling: repeating schedules measured from a moving
//! anchor, one per enabled period value.

use chime_core::{IntervalSchedule, ScheduleError};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Manages the set of enabled interval periods.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    schedules: HashMap<u32, IntervalSchedule>,
}

impl IntervalScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a period, anchoring it at `now`.
    ///
    /// Idempotent: returns `Ok(false)` without touching the existing anchor
    /// when the period is already enabled.
    pub fn enable(&mut self, period_minutes: u32, now: Instant) -> Result<bool, ScheduleError> {
        if self.schedules.contains_key(&period_minutes) {
            return Ok(false);
        }
        let schedule = IntervalSchedule::new(period_minutes, now)?;
        self.schedules.insert(period_minutes, schedule);
        Ok(true)
    }

    /// Disable a period, discarding its anchor. Idempotent; other schedules'
    /// due instants are unaffected.
    pub fn disable(&mut self, period_minutes: u32) -> bool {
        self.schedules.remove(&period_minutes).is_some()
    }

    /// Whether a period is currently enabled.
    pub fn is_enabled(&self, period_minutes: u32) -> bool {
        self.schedules.contains_key(&period_minutes)
    }

    /// Re-arm after a fire: the anchor resets to `now`, coalescing any
    /// missed occurrences into the fire that just happened.
    ///
    /// Returns `false` when the period is no longer enabled (a stale fire
    /// for a disabled schedule must not re-arm anything).
    pub fn rearm(&mut self, period_minutes: u32, now: Instant) -> bool {
        match self.schedules.get_mut(&period_minutes) {
            Some(schedule) => {
                schedule.rearm(now);
                true
            }
            None => false,
        }
    }

    /// Time remaining until `period_minutes` next fires, or `None` when it
    /// is not enabled. Never zero or negative.
    pub fn time_to_next_fire(&self, period_minutes: u32, now: Instant) -> Option<Duration> {
        self.schedules
            .get(&period_minutes)
            .map(|s| s.time_to_next_fire(now))
    }

    /// The schedule with the smallest remaining time, ties broken by the
    /// smaller period. `None` when nothing is enabled.
    pub fn nearest(&self, now: Instant) -> Option<(u32, Duration)> {
        self.schedules
            .values()
            .map(|s| (s.period_minutes, s.time_to_next_fire(now)))
            .min_by_key(|&(period, remaining)| (remaining, period))
    }

    /// Enabled periods in ascending order.
    pub fn enabled_periods(&self) -> Vec<u32> {
        let mut periods: Vec<u32> = self.schedules.keys().copied().collect();
        periods.sort_unstable();
        periods
    }

    /// Whether any period is enabled.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

#[cfg(test)]
#[path = "interval_tests.rs"]
mod tests;
