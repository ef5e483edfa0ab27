// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types for the chime scheduler.

use crate::timer::TimerId;
use serde::{Deserialize, Serialize};

/// Events that trigger state transitions in the scheduler.
///
/// Serializes with `{"type": "event:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    // -- interval timers --
    #[serde(rename = "interval:enabled")]
    IntervalEnabled { period_minutes: u32 },

    #[serde(rename = "interval:disabled")]
    IntervalDisabled { period_minutes: u32 },

    /// Flip an interval's enabled state (the UI toggle gesture).
    #[serde(rename = "interval:toggled")]
    IntervalToggled { period_minutes: u32 },

    // -- alarms --
    #[serde(rename = "alarm:enabled")]
    AlarmEnabled { offset_minutes: u32 },

    #[serde(rename = "alarm:disabled")]
    AlarmDisabled { offset_minutes: u32 },

    #[serde(rename = "alarm:toggled")]
    AlarmToggled { offset_minutes: u32 },

    // -- timers --
    /// An armed deadline was reached.
    #[serde(rename = "timer:due")]
    TimerDue { id: TimerId },

    // -- misc --
    /// Manual chime requested (not tied to any schedule).
    #[serde(rename = "chime:requested")]
    ChimeRequested,

    /// Daemon shutdown requested.
    #[serde(rename = "daemon:shutdown")]
    Shutdown,
}

impl Event {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Event::IntervalEnabled { .. } => "interval:enabled",
            Event::IntervalDisabled { .. } => "interval:disabled",
            Event::IntervalToggled { .. } => "interval:toggled",
            Event::AlarmEnabled { .. } => "alarm:enabled",
            Event::AlarmDisabled { .. } => "alarm:disabled",
            Event::AlarmToggled { .. } => "alarm:toggled",
            Event::TimerDue { .. } => "timer:due",
            Event::ChimeRequested => "chime:requested",
            Event::Shutdown => "daemon:shutdown",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
