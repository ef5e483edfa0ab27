// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the chime engine.
//!
//! The runtime is the single owner of all schedule state. Every mutation
//! (enable, disable, fire) goes through [`Runtime::process_event`], and each
//! handler takes the schedule-set lock for its whole duration, so callers on
//! any task (the daemon's timer tick, listener connections) see handlers as
//! atomic and countdown queries always observe a consistent snapshot.

use crate::error::RuntimeError;
use crate::executor::Executor;
use crate::projector::{self, DisplayState};
use crate::scheduler::Scheduler;
use crate::{AlarmScheduler, IntervalScheduler};
use chime_adapters::NotifyAdapter;
use chime_core::{Clock, Effect, Event, TimerId, TimerKind};
use chrono::NaiveDateTime;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

/// Notification title used for every chime.
const NOTIFY_TITLE: &str = "Chime";

/// The aggregate of both schedulers, guarded by one lock.
#[derive(Debug, Default)]
pub struct ScheduleSet {
    pub intervals: IntervalScheduler,
    pub alarms: AlarmScheduler,
}

/// Runtime that coordinates schedules, deadlines, and notifications.
pub struct Runtime<N, C: Clock> {
    executor: Executor<N, C>,
    schedules: Mutex<ScheduleSet>,
    /// Number of live-update sessions currently open (watch connections).
    live_watchers: AtomicUsize,
}

impl<N, C> Runtime<N, C>
where
    N: NotifyAdapter,
    C: Clock,
{
    /// Create a new runtime
    pub fn new(notifier: N, clock: C) -> Self {
        Self {
            executor: Executor::new(notifier, Arc::new(Mutex::new(Scheduler::new())), clock),
            schedules: Mutex::new(ScheduleSet::default()),
            live_watchers: AtomicUsize::new(0),
        }
    }

    /// Get a reference to the clock
    pub fn clock(&self) -> &C {
        self.executor.clock()
    }

    /// Get a shared reference to the deadline scheduler (for the daemon's
    /// timer-check tick)
    pub fn scheduler(&self) -> Arc<Mutex<Scheduler>> {
        self.executor.scheduler()
    }

    /// Process one event: mutate schedule state, then execute the resulting
    /// effects.
    pub async fn process_event(&self, event: Event) -> Result<(), RuntimeError> {
        tracing::debug!(event = event.name(), "processing");
        let effects = match event {
            Event::IntervalEnabled { period_minutes } => self.handle_interval_enabled(period_minutes),
            Event::IntervalDisabled { period_minutes } => {
                self.handle_interval_disabled(period_minutes)
            }
            Event::IntervalToggled { period_minutes } => self.handle_interval_toggled(period_minutes),
            Event::AlarmEnabled { offset_minutes } => self.handle_alarm_enabled(offset_minutes),
            Event::AlarmDisabled { offset_minutes } => self.handle_alarm_disabled(offset_minutes),
            Event::AlarmToggled { offset_minutes } => self.handle_alarm_toggled(offset_minutes),
            Event::TimerDue { id } => self.handle_timer_due(&id)?,
            Event::ChimeRequested => vec![Effect::Notify {
                title: NOTIFY_TITLE.to_string(),
                message: "Manual chime".to_string(),
            }],
            // Shutdown is handled by the daemon loop, not here.
            Event::Shutdown => vec![],
        };
        self.executor.execute_all(effects).await;
        Ok(())
    }

    fn handle_interval_enabled(&self, period_minutes: u32) -> Vec<Effect> {
        let now = self.clock().now();
        let mut set = self.schedules.lock();
        Self::enable_interval(&mut set, period_minutes, now)
    }

    fn handle_interval_disabled(&self, period_minutes: u32) -> Vec<Effect> {
        let mut set = self.schedules.lock();
        Self::disable_interval(&mut set, period_minutes)
    }

    /// The flip is decided and applied under one guard, so concurrent
    /// toggles of the same value linearize.
    fn handle_interval_toggled(&self, period_minutes: u32) -> Vec<Effect> {
        let now = self.clock().now();
        let mut set = self.schedules.lock();
        if set.intervals.is_enabled(period_minutes) {
            Self::disable_interval(&mut set, period_minutes)
        } else {
            Self::enable_interval(&mut set, period_minutes, now)
        }
    }

    fn enable_interval(set: &mut ScheduleSet, period_minutes: u32, now: Instant) -> Vec<Effect> {
        match set.intervals.enable(period_minutes, now) {
            Ok(true) => {
                tracing::info!(period_minutes, "interval enabled");
                vec![Effect::SetTimer {
                    id: TimerId::interval(period_minutes),
                    duration: std::time::Duration::from_secs(u64::from(period_minutes) * 60),
                }]
            }
            Ok(false) => {
                tracing::debug!(period_minutes, "interval already enabled");
                vec![]
            }
            Err(e) => {
                // Rejected silently: no state change, no effect.
                tracing::warn!(period_minutes, error = %e, "interval enable rejected");
                vec![]
            }
        }
    }

    fn disable_interval(set: &mut ScheduleSet, period_minutes: u32) -> Vec<Effect> {
        if set.intervals.disable(period_minutes) {
            tracing::info!(period_minutes, "interval disabled");
            vec![Effect::CancelTimer {
                id: TimerId::interval(period_minutes),
            }]
        } else {
            vec![]
        }
    }

    fn handle_alarm_enabled(&self, offset_minutes: u32) -> Vec<Effect> {
        let now_local = self.clock().now_local();
        let mut set = self.schedules.lock();
        Self::enable_alarm(&mut set, offset_minutes, now_local)
    }

    fn handle_alarm_disabled(&self, offset_minutes: u32) -> Vec<Effect> {
        let mut set = self.schedules.lock();
        Self::disable_alarm(&mut set, offset_minutes)
    }

    fn handle_alarm_toggled(&self, offset_minutes: u32) -> Vec<Effect> {
        let now_local = self.clock().now_local();
        let mut set = self.schedules.lock();
        if set.alarms.is_enabled(offset_minutes) {
            Self::disable_alarm(&mut set, offset_minutes)
        } else {
            Self::enable_alarm(&mut set, offset_minutes, now_local)
        }
    }

    fn enable_alarm(set: &mut ScheduleSet, offset_minutes: u32, now_local: NaiveDateTime) -> Vec<Effect> {
        match set.alarms.enable(offset_minutes, now_local) {
            Ok(true) => {
                // Armed delay is wall-clock derived; the due check at fire
                // time re-verifies against the wall clock.
                let remaining = set
                    .alarms
                    .time_to_next_fire(offset_minutes, now_local)
                    .unwrap_or_default();
                tracing::info!(offset_minutes, delay_secs = remaining.as_secs(), "alarm enabled");
                vec![Effect::SetTimer {
                    id: TimerId::alarm(offset_minutes),
                    duration: remaining,
                }]
            }
            Ok(false) => {
                tracing::debug!(offset_minutes, "alarm already enabled");
                vec![]
            }
            Err(e) => {
                tracing::warn!(offset_minutes, error = %e, "alarm enable rejected");
                vec![]
            }
        }
    }

    fn disable_alarm(set: &mut ScheduleSet, offset_minutes: u32) -> Vec<Effect> {
        if set.alarms.disable(offset_minutes) {
            tracing::info!(offset_minutes, "alarm disabled");
            vec![Effect::CancelTimer {
                id: TimerId::alarm(offset_minutes),
            }]
        } else {
            vec![]
        }
    }

    /// Handle an armed deadline being reached: notify and re-arm.
    ///
    /// Fires for schedules that have since been disabled are dropped (the
    /// cancellation guard); the enabled-set is the source of truth, not the
    /// deadline that happened to be pending.
    fn handle_timer_due(&self, id: &TimerId) -> Result<Vec<Effect>, RuntimeError> {
        let kind = id
            .kind()
            .ok_or_else(|| RuntimeError::UnknownTimer(id.to_string()))?;
        match kind {
            TimerKind::Interval(period_minutes) => Ok(self.handle_interval_fire(period_minutes)),
            TimerKind::Alarm(offset_minutes) => Ok(self.handle_alarm_fire(offset_minutes)),
        }
    }

    fn handle_interval_fire(&self, period_minutes: u32) -> Vec<Effect> {
        let now = self.clock().now();
        let mut set = self.schedules.lock();
        if !set.intervals.rearm(period_minutes, now) {
            tracing::debug!(period_minutes, "stale interval fire dropped");
            return vec![];
        }
        tracing::info!(period_minutes, "interval fired");
        vec![
            Effect::Notify {
                title: NOTIFY_TITLE.to_string(),
                message: format!("Every {} minutes", period_minutes),
            },
            Effect::SetTimer {
                id: TimerId::interval(period_minutes),
                duration: std::time::Duration::from_secs(u64::from(period_minutes) * 60),
            },
        ]
    }

    fn handle_alarm_fire(&self, offset_minutes: u32) -> Vec<Effect> {
        let now_local = self.clock().now_local();
        let mut set = self.schedules.lock();
        if !set.alarms.is_enabled(offset_minutes) {
            tracing::debug!(offset_minutes, "stale alarm fire dropped");
            return vec![];
        }

        // The deadline duration was derived from the wall clock when armed.
        // If the wall clock has since been adjusted (or a DST shift moved
        // the hour boundary), the mark may not actually be due yet: re-arm
        // for the corrected remaining time without chiming.
        if !set.alarms.is_due(offset_minutes, now_local) {
            let remaining = set
                .alarms
                .time_to_next_fire(offset_minutes, now_local)
                .unwrap_or_default();
            tracing::info!(
                offset_minutes,
                delay_secs = remaining.as_secs(),
                "alarm deadline early against wall clock, re-arming"
            );
            return vec![Effect::SetTimer {
                id: TimerId::alarm(offset_minutes),
                duration: remaining,
            }];
        }

        // Fire once (missed occurrences coalesce), then recompute the next
        // occurrence strictly after the adjusted now from wall-clock rules.
        let Some(next_fire) = set.alarms.rearm(offset_minutes, now_local) else {
            return vec![];
        };
        let remaining = set
            .alarms
            .time_to_next_fire(offset_minutes, now_local)
            .unwrap_or_default();
        tracing::info!(offset_minutes, next_fire = %next_fire, "alarm fired");
        vec![
            Effect::Notify {
                title: NOTIFY_TITLE.to_string(),
                message: format!("At :{:02} past the hour", offset_minutes),
            },
            Effect::SetTimer {
                id: TimerId::alarm(offset_minutes),
                duration: remaining,
            },
        ]
    }

    /// Formatted countdown snapshot for a presentation sink. Read-only.
    pub fn display_state(&self) -> DisplayState {
        let now = self.clock().now();
        let now_local = self.clock().now_local();
        let set = self.schedules.lock();
        projector::display_state(&set.intervals, &set.alarms, now, now_local)
    }

    /// A presentation sink is about to poll the display at high frequency.
    pub fn begin_live_updates(&self) {
        self.live_watchers.fetch_add(1, Ordering::SeqCst);
    }

    /// The presentation sink stopped polling.
    pub fn end_live_updates(&self) {
        // Saturating: an unmatched end is a caller bug but must not wrap.
        let _ = self
            .live_watchers
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Whether any live-update session is open.
    pub fn live_updates_active(&self) -> bool {
        self.live_watchers.load(Ordering::SeqCst) > 0
    }

    /// Cancel all pending deadlines. No fire may occur after this.
    pub fn shutdown(&self) {
        self.executor.scheduler().lock().cancel_all();
        tracing::info!("scheduler shut down, all pending timers cancelled");
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
