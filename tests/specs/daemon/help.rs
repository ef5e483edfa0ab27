//! Daemon help and version specs
//!
//! Verify chimed --help, --version, and related flags work without
//! acquiring the daemon lock (no startup attempt).

use crate::prelude::*;
use std::process::Command;

fn chimed() -> Command {
    Command::new(chimed_binary())
}

#[test]
fn chimed_version_shows_version() {
    let output = chimed().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("chimed 0.1"),
        "expected version line, got: {stdout}"
    );
}

#[test]
fn chimed_short_version_shows_version() {
    let output = chimed().arg("-v").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("chimed 0.1"));
}

#[test]
fn chimed_help_shows_usage() {
    let output = chimed().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("USAGE:"),
        "expected USAGE section, got: {stdout}"
    );
    assert!(stdout.contains("--help"));
    assert!(stdout.contains("--version"));
}

#[test]
fn chimed_unknown_argument_fails() {
    let output = chimed().arg("--frobnicate").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected argument"));
}
