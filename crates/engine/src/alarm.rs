// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm scheduling: hour-relative schedules that fire at a fixed
//! minute-of-hour, one per enabled offset value.
//!
//! Due instants are wall-clock times recomputed after every firing and every
//! (re)enable. A firing cycle never adds a fixed 3600 seconds; the next
//! occurrence is always derived from the current local time, so hour
//! boundaries shifted by DST or clock adjustments are picked up on the next
//! recomputation.

use chime_core::{AlarmSchedule, ScheduleError};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::time::Duration;

/// Manages the set of enabled alarm offsets.
#[derive(Debug, Default)]
pub struct AlarmScheduler {
    schedules: HashMap<u32, AlarmSchedule>,
}

impl AlarmScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable an offset, arming it for the next matching instant strictly
    /// after `now`.
    ///
    /// Idempotent: re-enabling returns `Ok(false)` and must not recompute
    /// `next_fire` (that would delay or accelerate the pending firing).
    pub fn enable(&mut self, offset_minutes: u32, now: NaiveDateTime) -> Result<bool, ScheduleError> {
        if self.schedules.contains_key(&offset_minutes) {
            return Ok(false);
        }
        let schedule = AlarmSchedule::new(offset_minutes, now)?;
        self.schedules.insert(offset_minutes, schedule);
        Ok(true)
    }

    /// Disable an offset, discarding its due instant. Idempotent.
    pub fn disable(&mut self, offset_minutes: u32) -> bool {
        self.schedules.remove(&offset_minutes).is_some()
    }

    /// Whether an offset is currently enabled.
    pub fn is_enabled(&self, offset_minutes: u32) -> bool {
        self.schedules.contains_key(&offset_minutes)
    }

    /// The armed due instant for an offset.
    pub fn next_fire(&self, offset_minutes: u32) -> Option<NaiveDateTime> {
        self.schedules.get(&offset_minutes).map(|s| s.next_fire)
    }

    /// Whether the offset's armed occurrence has been reached.
    pub fn is_due(&self, offset_minutes: u32, now: NaiveDateTime) -> bool {
        self.schedules
            .get(&offset_minutes)
            .is_some_and(|s| s.is_due(now))
    }

    /// Re-arm after a fire: recompute the next matching instant strictly
    /// after `now`. Returns the new due instant, or `None` when the offset
    /// is no longer enabled (stale fires must not re-arm).
    pub fn rearm(&mut self, offset_minutes: u32, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let schedule = self.schedules.get_mut(&offset_minutes)?;
        schedule.rearm(now);
        Some(schedule.next_fire)
    }

    /// Time remaining until `offset_minutes` next fires, or `None` when it
    /// is not enabled. Clamped to zero when the clock has moved past the
    /// due instant.
    pub fn time_to_next_fire(&self, offset_minutes: u32, now: NaiveDateTime) -> Option<Duration> {
        self.schedules
            .get(&offset_minutes)
            .map(|s| s.time_to_next_fire(now))
    }

    /// The schedule with the smallest due instant, ties broken by the
    /// smaller offset. `None` when nothing is enabled.
    pub fn nearest(&self) -> Option<(u32, NaiveDateTime)> {
        self.schedules
            .values()
            .map(|s| (s.offset_minutes, s.next_fire))
            .min_by_key(|&(offset, next_fire)| (next_fire, offset))
    }

    /// Enabled offsets in ascending order.
    pub fn enabled_offsets(&self) -> Vec<u32> {
        let mut offsets: Vec<u32> = self.schedules.keys().copied().collect();
        offsets.sort_unstable();
        offsets
    }

    /// Whether any offset is enabled.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
