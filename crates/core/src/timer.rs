// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifier type for tracking scheduled timers.
//!
//! TimerId uniquely identifies an armed deadline in the scheduler. Each
//! enabled interval period and alarm offset owns exactly one timer, so the
//! identifier encodes which schedule a firing belongs to.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a timer instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub String);

/// Which schedule a timer belongs to, parsed from its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Repeating interval timer, fires every `period_minutes`.
    Interval(u32),
    /// Hour-relative alarm, fires at minute `offset_minutes` of each hour.
    Alarm(u32),
}

impl TimerId {
    /// Create a new TimerId from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value of this TimerId.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Timer ID for an interval schedule's next fire.
    pub fn interval(period_minutes: u32) -> Self {
        Self::new(format!("interval:{}", period_minutes))
    }

    /// Timer ID for an alarm schedule's next fire.
    pub fn alarm(offset_minutes: u32) -> Self {
        Self::new(format!("alarm:{}", offset_minutes))
    }

    /// Parse the schedule kind and value out of this identifier.
    ///
    /// Returns `None` for identifiers that don't name a schedule timer.
    pub fn kind(&self) -> Option<TimerKind> {
        if let Some(rest) = self.0.strip_prefix("interval:") {
            rest.parse().ok().map(TimerKind::Interval)
        } else if let Some(rest) = self.0.strip_prefix("alarm:") {
            rest.parse().ok().map(TimerKind::Alarm)
        } else {
            None
        }
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TimerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TimerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for TimerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TimerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for TimerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
