// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::daemon_process::{
    cleanup_stale_socket, daemon_socket, probe_socket, start_daemon_background,
};

use chime_daemon::protocol::{self, ProtocolError};
use chime_daemon::{Request, Response};
use thiserror::Error;
use tokio::net::UnixStream;

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for IPC requests
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("CHIME_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for daemon to start
pub fn timeout_connect() -> Duration {
    parse_duration_ms("CHIME_TIMEOUT_CONNECT_MS").unwrap_or(Duration::from_secs(5))
}

/// Polling interval for connection retries
pub fn poll_interval() -> Duration {
    parse_duration_ms("CHIME_CONNECT_POLL_MS").unwrap_or(Duration::from_millis(50))
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running")]
    DaemonNotRunning,

    #[error("Failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("Connection timeout waiting for daemon to start")]
    DaemonStartTimeout,

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,
}

/// Daemon client
pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    /// For action commands - connect, auto-starting the daemon if needed.
    ///
    /// Action commands mutate state and are user-initiated (on, off, toggle,
    /// beep). A missing daemon is not an error for them; it just hasn't been
    /// needed yet.
    pub fn for_action() -> Result<Self, ClientError> {
        match Self::connect() {
            Ok(client) => {
                if probe_socket(&client.socket_path) {
                    Ok(client)
                } else {
                    cleanup_stale_socket()?;
                    start_daemon_background()?;
                    Self::connect_with_retry(timeout_connect())
                }
            }
            Err(ClientError::DaemonNotRunning) => {
                start_daemon_background()?;
                Self::connect_with_retry(timeout_connect())
            }
            Err(e) => Err(e),
        }
    }

    /// For query commands - connect only, no auto-start.
    ///
    /// If the daemon isn't running there are no schedules to report.
    pub fn for_query() -> Result<Self, ClientError> {
        let client = Self::connect()?;
        if probe_socket(&client.socket_path) {
            Ok(client)
        } else {
            Err(ClientError::DaemonNotRunning)
        }
    }

    fn connect() -> Result<Self, ClientError> {
        let socket_path = daemon_socket()?;
        if !socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }
        Ok(Self { socket_path })
    }

    fn connect_with_retry(timeout: Duration) -> Result<Self, ClientError> {
        let socket_path = daemon_socket()?;
        let start = Instant::now();
        while start.elapsed() < timeout {
            if probe_socket(&socket_path) {
                return Ok(Self { socket_path });
            }
            std::thread::sleep(poll_interval());
        }
        Err(ClientError::DaemonStartTimeout)
    }

    /// Send one request and read one response.
    pub async fn request(&self, request: &Request) -> Result<Response, ClientError> {
        let response = tokio::time::timeout(timeout_ipc(), self.request_inner(request))
            .await
            .map_err(|_| ClientError::DaemonNotRunning)??;

        if let Response::Error { message } = response {
            return Err(ClientError::Rejected(message));
        }
        Ok(response)
    }

    async fn request_inner(&self, request: &Request) -> Result<Response, ClientError> {
        let mut stream = UnixStream::connect(&self.socket_path).await?;
        let data = protocol::encode(request)?;
        protocol::write_message(&mut stream, &data).await?;
        let bytes = protocol::read_message(&mut stream).await?;
        Ok(protocol::decode(&bytes)?)
    }

    /// Open a `Watch` stream. The returned socket yields one length-prefixed
    /// `Response::Status` frame per interval until the daemon goes away.
    pub async fn watch(&self) -> Result<UnixStream, ClientError> {
        let mut stream = UnixStream::connect(&self.socket_path).await?;
        let data = protocol::encode(&Request::Watch)?;
        protocol::write_message(&mut stream, &data).await?;
        Ok(stream)
    }

    /// Read the next frame from a `watch()` stream.
    pub async fn next_frame(stream: &mut UnixStream) -> Result<Response, ClientError> {
        let bytes = protocol::read_message(stream).await?;
        Ok(protocol::decode(&bytes)?)
    }
}
