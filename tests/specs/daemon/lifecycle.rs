//! Daemon lifecycle specs
//!
//! Verify daemon start/stop behavior and single-instance locking.

use crate::prelude::*;
use std::process::{Command, Stdio};

#[test]
fn daemon_creates_socket_and_pid_file() {
    let daemon = DaemonGuard::start();

    assert!(daemon.socket_path().exists());
    let pid = std::fs::read_to_string(daemon.pid_path()).unwrap();
    assert!(pid.trim().parse::<u32>().is_ok(), "pid file: {pid}");
}

#[test]
fn second_daemon_refuses_to_start() {
    let daemon = DaemonGuard::start();

    let output = Command::new(chimed_binary())
        .env("CHIME_STATE_DIR", daemon.state_dir())
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("already running"),
        "expected lock message, got: {stderr}"
    );

    // The running daemon's files survive the failed second start.
    assert!(daemon.socket_path().exists());
    assert!(daemon.pid_path().exists());
}

#[test]
fn shutdown_command_stops_the_daemon_and_cleans_up() {
    let mut daemon = DaemonGuard::start();

    daemon
        .chime()
        .args(&["shutdown"])
        .passes()
        .stdout_has("chimed stopping");

    assert!(daemon.wait_for_exit(), "daemon did not exit after shutdown");
    assert!(!daemon.socket_path().exists());
    assert!(!daemon.pid_path().exists());
}

#[test]
fn shutdown_without_daemon_reports_not_running() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(&["shutdown"])
        .env("CHIME_STATE_DIR", dir.path())
        .passes()
        .stdout_has("chimed is not running");
}

#[test]
fn status_without_daemon_reports_not_running() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(&["status"])
        .env("CHIME_STATE_DIR", dir.path())
        .passes()
        .stdout_has("chimed is not running");
}
