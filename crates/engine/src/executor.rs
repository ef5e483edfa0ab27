// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::Scheduler;
use chime_adapters::NotifyAdapter;
use chime_core::{Clock, Effect};
use std::sync::Arc;

use parking_lot::Mutex;

/// Executes effects using the configured notifier and deadline scheduler.
pub struct Executor<N, C: Clock> {
    notifier: N,
    scheduler: Arc<Mutex<Scheduler>>,
    clock: C,
}

impl<N, C> Executor<N, C>
where
    N: NotifyAdapter,
    C: Clock,
{
    /// Create a new executor
    pub fn new(notifier: N, scheduler: Arc<Mutex<Scheduler>>, clock: C) -> Self {
        Self {
            notifier,
            scheduler,
            clock,
        }
    }

    /// Get a reference to the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get a reference to the scheduler
    pub fn scheduler(&self) -> Arc<Mutex<Scheduler>> {
        Arc::clone(&self.scheduler)
    }

    /// Execute a single effect with tracing.
    ///
    /// Effects never fail the runtime: notification errors are contained
    /// here (logged and dropped) so the scheduler always proceeds to re-arm.
    pub async fn execute(&self, effect: Effect) {
        let span = tracing::info_span!("effect", effect = effect.name());
        let _guard = span.enter();

        tracing::debug!(fields = %effect.fields(), "executing");

        match effect {
            Effect::SetTimer { id, duration } => {
                let now = self.clock.now();
                self.scheduler.lock().set_timer(id, duration, now);
            }

            Effect::CancelTimer { id } => {
                self.scheduler.lock().cancel_timer(id.as_str());
            }

            Effect::Notify { title, message } => {
                if let Err(e) = self.notifier.notify(&title, &message).await {
                    tracing::warn!(%title, error = %e, "notification send failed");
                }
            }
        }
    }

    /// Execute multiple effects in order
    pub async fn execute_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute(effect).await;
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
