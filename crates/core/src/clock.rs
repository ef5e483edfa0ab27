// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for deterministic time in tests.
//!
//! The scheduler needs two notions of time: a monotonic [`Instant`] for
//! interval arithmetic and deadline bookkeeping, and the host's local
//! wall-clock time for alarm (minute-of-hour) arithmetic. Alarms must follow
//! the local clock across DST shifts and manual adjustments, so they are never
//! derived from the monotonic clock.

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of current time for the runtime.
pub trait Clock: Send + Sync + 'static {
    /// Monotonic instant, used for interval anchors and timer deadlines.
    fn now(&self) -> Instant;

    /// Local wall-clock time, used for alarm due-time computation.
    fn now_local(&self) -> NaiveDateTime;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Manually-advanced clock for tests.
///
/// Cloning shares the underlying time, so a clone handed to the runtime can
/// be advanced from the test body.
#[derive(Debug, Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeClockInner>>,
}

#[derive(Debug)]
struct FakeClockInner {
    instant: Instant,
    local: NaiveDateTime,
}

impl FakeClock {
    /// Create a fake clock starting at the Unix epoch (local midnight).
    pub fn new() -> Self {
        Self::at_local(NaiveDateTime::default())
    }

    /// Create a fake clock whose wall clock reads `local`.
    pub fn at_local(local: NaiveDateTime) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeClockInner {
                instant: Instant::now(),
                local,
            })),
        }
    }

    /// Advance both the monotonic and wall clocks by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut inner = self.inner.lock();
        inner.instant += duration;
        if let Ok(delta) = chrono::Duration::from_std(duration) {
            inner.local += delta;
        }
    }

    /// Set the wall clock without touching the monotonic clock.
    ///
    /// Simulates the system clock being adjusted (NTP step, manual change).
    pub fn set_local(&self, local: NaiveDateTime) {
        self.inner.lock().local = local;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().instant
    }

    fn now_local(&self) -> NaiveDateTime {
        self.inner.lock().local
    }
}
