// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline bookkeeping for armed schedules.
//!
//! One pending deadline per schedule timer, keyed by [`TimerId`]. The daemon
//! loop polls [`Scheduler::fired_timers`] at 1-second resolution; firing
//! consumes the deadline, so each armed occurrence produces exactly one
//! `timer:due` event even when the polling tick overshoots it.

use chime_core::{Event, TimerId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Pending deadline entry
#[derive(Debug, Clone)]
struct Deadline {
    fires_at: Instant,
}

/// Manages pending deadlines for the runtime
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<TimerId, Deadline>,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a deadline. Re-arming an existing id replaces its deadline.
    pub fn set_timer(&mut self, id: TimerId, duration: Duration, now: Instant) {
        let fires_at = now + duration;
        self.timers.insert(id, Deadline { fires_at });
    }

    /// Cancel a pending deadline
    pub fn cancel_timer(&mut self, id: &str) {
        self.timers.remove(id);
    }

    /// Cancel every pending deadline (shutdown: no fire may happen after)
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Drain all deadlines that have been reached, as `timer:due` events
    pub fn fired_timers(&mut self, now: Instant) -> Vec<Event> {
        let mut due: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, deadline)| deadline.fires_at <= now)
            .map(|(id, _)| id.clone())
            .collect();
        // Deterministic firing order for same-tick deadlines
        due.sort();

        for id in &due {
            self.timers.remove(id.as_str());
        }

        due.into_iter().map(|id| Event::TimerDue { id }).collect()
    }

    /// Get the next deadline instant
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.fires_at).min()
    }

    /// Check if there are any pending deadlines
    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
