// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of daemon responses for the terminal.

use chime_engine::DisplayState;

/// Render a status snapshot as terminal lines.
pub fn render_status(display: &DisplayState) -> String {
    let mut lines = Vec::new();

    if let Some(ref countdown) = display.interval_line {
        lines.push(format!(
            "interval   {}   [{}]",
            countdown,
            join_periods(&display.checked_intervals)
        ));
    }

    if let Some(ref countdown) = display.alarm_line {
        lines.push(format!(
            "hour mark  {}   [{}]",
            countdown,
            join_offsets(&display.checked_alarm_offsets)
        ));
    }

    if lines.is_empty() {
        lines.push("no schedules enabled".to_string());
    }

    lines.join("\n")
}

fn join_periods(periods: &[u32]) -> String {
    periods
        .iter()
        .map(|p| format!("{}m", p))
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_offsets(offsets: &[u32]) -> String {
    offsets
        .iter()
        .map(|o| format!(":{:02}", o))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
