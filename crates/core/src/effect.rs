// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the runtime needs to perform.

use crate::timer::TimerId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Effects that need to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Timer effects ===
    /// Arm (or re-arm) a deadline for a schedule.
    SetTimer {
        id: TimerId,
        #[serde(with = "duration_serde")]
        duration: Duration,
    },

    /// Cancel a pending deadline.
    CancelTimer { id: TimerId },

    // === Notification effects ===
    /// Play the audible alert. Best-effort and fire-and-forget: the
    /// scheduler re-arms regardless of whether the sound actually played.
    Notify { title: String, message: String },
}

impl Effect {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::SetTimer { .. } => "set_timer",
            Effect::CancelTimer { .. } => "cancel_timer",
            Effect::Notify { .. } => "notify",
        }
    }

    /// Loggable field summary.
    pub fn fields(&self) -> String {
        match self {
            Effect::SetTimer { id, duration } => {
                format!("id={} duration_ms={}", id, duration.as_millis())
            }
            Effect::CancelTimer { id } => format!("id={}", id),
            Effect::Notify { title, .. } => format!("title={}", title),
        }
    }
}

/// Serialize `Duration` as integer milliseconds.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        (d.as_millis() as u64).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
