// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime scheduling engine: interval timers, hour-relative alarms, and the
//! countdown projection over both.

mod alarm;
mod error;
mod executor;
mod interval;
mod projector;
mod runtime;
mod scheduler;

#[cfg(test)]
mod test_helpers;

pub use alarm::AlarmScheduler;
pub use error::RuntimeError;
pub use executor::Executor;
pub use interval::IntervalScheduler;
pub use projector::{display_state, next_alarm_countdown, next_interval_countdown, Countdown, DisplayState};
pub use runtime::{Runtime, ScheduleSet};
pub use scheduler::Scheduler;
