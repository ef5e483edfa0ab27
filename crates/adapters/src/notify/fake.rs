// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory notify adapter for tests.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records notifications instead of delivering them.
#[derive(Clone, Debug, Default)]
pub struct FakeNotifyAdapter {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(title, message)` pairs delivered so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    /// Number of notifications delivered.
    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Make subsequent deliveries fail, to verify the scheduler re-arms
    /// regardless.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        if *self.fail.lock() {
            return Err(NotifyError::Unavailable("fake failure".to_string()));
        }
        self.sent
            .lock()
            .push((title.to_string(), message.to_string()));
        Ok(())
    }
}
