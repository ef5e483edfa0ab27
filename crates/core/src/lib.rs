// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime-core: Core library for the chime notification scheduler

pub mod clock;
pub mod effect;
pub mod event;
pub mod schedule;
pub mod time_fmt;
pub mod timer;

pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::Effect;
pub use event::Event;
pub use schedule::{
    next_occurrence, AlarmSchedule, IntervalSchedule, ScheduleError, MAX_ALARM_OFFSET,
};
pub use time_fmt::{format_alarm_countdown, format_min_sec, format_wall_time};
pub use timer::{TimerId, TimerKind};
