// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon process management utilities.
//!
//! Functions for starting, stopping, and monitoring the chimed process.

use crate::client::ClientError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Start the daemon in the background, returning the child process handle
pub fn start_daemon_background() -> Result<std::process::Child, ClientError> {
    let chimed_path = find_chimed_binary();

    Command::new(&chimed_path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(e.to_string()))
}

/// Find the chimed binary: env override, then a sibling of the current
/// executable, then PATH.
fn find_chimed_binary() -> PathBuf {
    if let Ok(path) = std::env::var("CHIME_DAEMON_BIN") {
        return PathBuf::from(path);
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("chimed");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    PathBuf::from("chimed")
}

/// Get the socket path for the user-level daemon.
pub fn daemon_socket() -> Result<PathBuf, ClientError> {
    Ok(state_dir()?.join("chimed.sock"))
}

/// Get the state directory for chime (user-level daemon).
///
/// Mirrors the daemon's own resolution so client and daemon always agree.
pub fn state_dir() -> Result<PathBuf, ClientError> {
    if let Ok(dir) = std::env::var("CHIME_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }

    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("chime"));
    }

    let home = std::env::var("HOME").map_err(|_| ClientError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/chime"))
}

/// Get the PID from the daemon PID file, if it exists
pub fn read_daemon_pid() -> Result<Option<u32>, ClientError> {
    let pid_path = state_dir()?.join("chimed.pid");

    if !pid_path.exists() {
        return Ok(None);
    }

    match std::fs::read_to_string(&pid_path) {
        Ok(content) => Ok(content.trim().parse::<u32>().ok()),
        Err(_) => Ok(None),
    }
}

/// Execute kill command with the given signal and PID
fn kill_signal(signal: &str, pid: u32) -> bool {
    Command::new("kill")
        .args([signal, &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Check if a process with the given PID exists
pub fn process_exists(pid: u32) -> bool {
    kill_signal("-0", pid)
}

/// Probe whether a Unix socket is accepting connections.
pub fn probe_socket(socket_path: &Path) -> bool {
    std::os::unix::net::UnixStream::connect(socket_path).is_ok()
}

/// Remove stale socket and PID files when the daemon is not running.
///
/// Called when the socket file exists but we can't connect to it.
/// If the PID file references a dead process (or no PID file exists),
/// removes stale files so a fresh daemon can start.
pub fn cleanup_stale_socket() -> Result<(), ClientError> {
    let dir = state_dir()?;
    let socket_path = dir.join("chimed.sock");
    let pid_path = dir.join("chimed.pid");

    if pid_path.exists() {
        if let Ok(Some(pid)) = read_daemon_pid() {
            if !process_exists(pid) {
                let _ = std::fs::remove_file(&socket_path);
                let _ = std::fs::remove_file(&pid_path);
            }
        } else {
            // PID file exists but can't read a valid PID - remove stale files
            let _ = std::fs::remove_file(&socket_path);
            let _ = std::fs::remove_file(&pid_path);
        }
    } else {
        // No PID file but socket exists - remove stale socket
        let _ = std::fs::remove_file(&socket_path);
    }

    Ok(())
}
