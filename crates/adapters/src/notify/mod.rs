// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audible-alert notification adapter.
//!
//! The scheduler treats notification as best-effort and fire-and-forget:
//! adapters must contain delivery failures (log and fall back) rather than
//! surfacing them, so the scheduler always proceeds to re-arm.

mod desktop;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use desktop::DesktopNotifyAdapter;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification backend unavailable: {0}")]
    Unavailable(String),
}

/// Plays the audible alert for a firing schedule.
#[async_trait]
pub trait NotifyAdapter: Send + Sync + 'static {
    /// Deliver a notification. Must not block on delivery; failures are
    /// contained by the adapter wherever possible.
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}
