// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for engine tests.

use crate::Runtime;
use chime_adapters::FakeNotifyAdapter;
use chime_core::FakeClock;
use chrono::{NaiveDate, NaiveDateTime};

/// Runtime wired to fakes, as used by most runtime tests.
pub type TestRuntime = Runtime<FakeNotifyAdapter, FakeClock>;

pub struct TestHarness {
    pub runtime: TestRuntime,
    pub clock: FakeClock,
    pub notifier: FakeNotifyAdapter,
}

/// Local wall-clock time on a fixed test date.
pub fn local(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Build a runtime with a fake clock reading `now_local` and a fake notifier.
pub fn harness_at(now_local: NaiveDateTime) -> TestHarness {
    let clock = FakeClock::at_local(now_local);
    let notifier = FakeNotifyAdapter::new();
    let runtime = Runtime::new(notifier.clone(), clock.clone());
    TestHarness {
        runtime,
        clock,
        notifier,
    }
}
