// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use chime_core::ScheduleError;
use thiserror::Error;

/// Errors that can occur in the runtime.
///
/// Invalid enable requests are deliberately NOT here: the runtime rejects
/// them silently (logged, no state change) per the scheduler's error policy.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("unknown timer id: {0}")]
    UnknownTimer(String),
}
