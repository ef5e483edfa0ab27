//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for testing chime CLI behavior against a real
//! daemon running in an isolated state directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

// Aggressive timeouts for fast tests.
const CHIME_TIMEOUT_CONNECT_MS: &str = "2000";
const CHIME_TIMEOUT_IPC_MS: &str = "500";
const CHIME_CONNECT_POLL_MS: &str = "5";

/// How long specs wait for an observable condition.
pub const SPEC_WAIT_MAX: Duration = Duration::from_secs(2);
pub const SPEC_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale (e.g. compiled by a removed worktree
/// into a shared target directory).
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>, so its
    // grandparent is target/debug/ where chime and chimed are built.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Returns the path to the chime binary.
pub fn chime_binary() -> PathBuf {
    binary_path("chime")
}

/// Returns the path to the chimed daemon binary.
pub fn chimed_binary() -> PathBuf {
    binary_path("chimed")
}

/// Poll until `pred` holds or the spec wait budget runs out.
pub fn wait_until(pred: impl Fn() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < SPEC_WAIT_MAX {
        if pred() {
            return true;
        }
        std::thread::sleep(SPEC_POLL_INTERVAL);
    }
    pred()
}

/// Create a CLI builder for chime commands (no daemon state dir).
pub fn cli() -> CliBuilder {
    CliBuilder::new(None)
}

/// A daemon running against a throwaway state directory.
///
/// Killed (and its state removed) on drop so specs never leak processes.
pub struct DaemonGuard {
    child: Child,
    state_dir: tempfile::TempDir,
}

impl DaemonGuard {
    /// Start a daemon in an isolated state directory and wait until its
    /// socket accepts connections.
    pub fn start() -> Self {
        let state_dir = tempfile::tempdir().expect("create state dir");
        let child = Command::new(chimed_binary())
            .env("CHIME_STATE_DIR", state_dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn chimed");

        let socket = state_dir.path().join("chimed.sock");
        assert!(
            wait_until(|| std::os::unix::net::UnixStream::connect(&socket).is_ok()),
            "daemon did not start listening on {}",
            socket.display()
        );

        Self { child, state_dir }
    }

    pub fn state_dir(&self) -> &Path {
        self.state_dir.path()
    }

    pub fn socket_path(&self) -> PathBuf {
        self.state_dir.path().join("chimed.sock")
    }

    pub fn pid_path(&self) -> PathBuf {
        self.state_dir.path().join("chimed.pid")
    }

    /// Build a chime command bound to this daemon's state directory.
    pub fn chime(&self) -> CliBuilder {
        CliBuilder::new(Some(self.state_dir.path().to_path_buf()))
    }

    /// Wait for the daemon process to exit.
    pub fn wait_for_exit(&mut self) -> bool {
        let start = Instant::now();
        while start.elapsed() < SPEC_WAIT_MAX {
            if let Ok(Some(_)) = self.child.try_wait() {
                return true;
            }
            std::thread::sleep(SPEC_POLL_INTERVAL);
        }
        false
    }
}

impl Drop for DaemonGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new(state_dir: Option<PathBuf>) -> Self {
        let mut envs = vec![
            (
                "CHIME_DAEMON_BIN".into(),
                chimed_binary().to_string_lossy().into(),
            ),
            (
                "CHIME_TIMEOUT_CONNECT_MS".into(),
                CHIME_TIMEOUT_CONNECT_MS.into(),
            ),
            ("CHIME_TIMEOUT_IPC_MS".into(), CHIME_TIMEOUT_IPC_MS.into()),
            ("CHIME_CONNECT_POLL_MS".into(), CHIME_CONNECT_POLL_MS.into()),
        ];
        if let Some(dir) = state_dir {
            envs.push((
                "CHIME_STATE_DIR".into(),
                dir.to_string_lossy().into_owned(),
            ));
        }
        Self {
            args: Vec::new(),
            envs,
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(chime_binary());
        cmd.args(&self.args);
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}
