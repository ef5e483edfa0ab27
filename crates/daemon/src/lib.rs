// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime daemon library: lifecycle, IPC protocol, and listener, shared with
//! the `chime` CLI client.

pub mod lifecycle;
pub mod listener;
pub mod protocol;

pub use protocol::{Request, Response};
