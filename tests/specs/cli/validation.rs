//! CLI argument validation specs
//!
//! Out-of-range schedule values are rejected by the CLI before any
//! daemon is contacted.

use crate::prelude::*;

#[test]
fn interval_of_zero_minutes_is_rejected() {
    cli()
        .args(&["interval", "on", "0"])
        .fails()
        .stderr_has("invalid value");
}

#[test]
fn alarm_offset_above_59_is_rejected() {
    cli()
        .args(&["alarm", "on", "60"])
        .fails()
        .stderr_has("invalid value");
}

#[test]
fn non_numeric_minutes_are_rejected() {
    cli().args(&["interval", "on", "soon"]).fails();
}

#[test]
fn alarm_offset_59_is_within_range() {
    // Passes argument parsing; fails later because the daemon cannot be
    // started (the daemon binary is a stub that exits immediately).
    let dir = tempfile::tempdir().unwrap();
    let output = cli()
        .args(&["alarm", "on", "59"])
        .env("CHIME_STATE_DIR", dir.path())
        .env("CHIME_DAEMON_BIN", "/bin/false")
        .command()
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("invalid value"),
        "59 should parse: {stderr}"
    );
}
