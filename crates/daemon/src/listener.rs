// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for handling socket I/O.
//!
//! The Listener runs in a spawned task, accepting connections and handling
//! them without blocking the engine loop. Mutations are applied to the
//! shared runtime before the response is written, so a status query issued
//! right after a mutation always sees its result.

use std::sync::Arc;
use std::time::Duration;

use chime_adapters::NotifyAdapter;
use chime_core::{Clock, Event};
use chime_engine::Runtime;
use thiserror::Error;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;
use tracing::{debug, error, warn};

use crate::protocol::{self, ProtocolError, Request, Response, DEFAULT_TIMEOUT};

/// How often a `Watch` stream pushes a fresh display frame.
const WATCH_FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// Listener task for accepting socket connections.
pub struct Listener<N: NotifyAdapter, C: Clock> {
    socket: UnixListener,
    runtime: Arc<Runtime<N, C>>,
    shutdown: Arc<Notify>,
}

/// Errors from connection handling.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl<N: NotifyAdapter, C: Clock> Listener<N, C> {
    /// Create a new listener.
    pub fn new(socket: UnixListener, runtime: Arc<Runtime<N, C>>, shutdown: Arc<Notify>) -> Self {
        Self {
            socket,
            runtime,
            shutdown,
        }
    }

    /// Run the listener loop until the daemon exits, spawning a task for
    /// each connection.
    pub async fn run(self) {
        loop {
            match self.socket.accept().await {
                Ok((stream, _)) => {
                    let runtime = Arc::clone(&self.runtime);
                    let shutdown = Arc::clone(&self.shutdown);

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, runtime, shutdown).await {
                            match e {
                                ConnectionError::Protocol(ProtocolError::ConnectionClosed) => {
                                    debug!("Client disconnected")
                                }
                                ConnectionError::Protocol(ProtocolError::Timeout) => {
                                    warn!("Connection timeout")
                                }
                                _ => error!("Connection error: {}", e),
                            }
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handle a single client connection: one request, one response (or a
/// frame stream for `Watch`).
async fn handle_connection<N: NotifyAdapter, C: Clock>(
    stream: UnixStream,
    runtime: Arc<Runtime<N, C>>,
    shutdown: Arc<Notify>,
) -> Result<(), ConnectionError> {
    let (mut reader, mut writer) = stream.into_split();

    let request = protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await?;

    // Status and Watch are polled frequently; log them at debug only.
    if matches!(request, Request::Status | Request::Watch) {
        debug!(request = ?request, "received query");
    } else {
        tracing::info!(request = ?request, "received request");
    }

    if matches!(request, Request::Watch) {
        return watch_loop(&mut writer, &runtime).await;
    }

    let response = handle_request(request, &runtime, &shutdown).await;
    debug!("Sending response: {:?}", response);
    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;

    Ok(())
}

/// Handle a single request and return a response.
async fn handle_request<N: NotifyAdapter, C: Clock>(
    request: Request,
    runtime: &Runtime<N, C>,
    shutdown: &Notify,
) -> Response {
    let event = match request {
        Request::Ping => return Response::Ok,

        Request::Status => {
            return Response::Status {
                display: runtime.display_state(),
            }
        }

        Request::Shutdown => {
            shutdown.notify_one();
            return Response::Ok;
        }

        Request::IntervalEnable { period_minutes } => Event::IntervalEnabled { period_minutes },
        Request::IntervalDisable { period_minutes } => Event::IntervalDisabled { period_minutes },
        Request::IntervalToggle { period_minutes } => Event::IntervalToggled { period_minutes },
        Request::AlarmEnable { offset_minutes } => Event::AlarmEnabled { offset_minutes },
        Request::AlarmDisable { offset_minutes } => Event::AlarmDisabled { offset_minutes },
        Request::AlarmToggle { offset_minutes } => Event::AlarmToggled { offset_minutes },
        Request::Chime => Event::ChimeRequested,

        // Watch is handled at the connection level; a stray one here is a
        // caller bug.
        Request::Watch => {
            return Response::Error {
                message: "watch requires a streaming connection".to_string(),
            }
        }
    };

    match runtime.process_event(event).await {
        Ok(()) => Response::Ok,
        Err(e) => Response::Error {
            message: e.to_string(),
        },
    }
}

/// Stream display frames until the client hangs up.
async fn watch_loop<N: NotifyAdapter, C: Clock, W>(
    writer: &mut W,
    runtime: &Runtime<N, C>,
) -> Result<(), ConnectionError>
where
    W: tokio::io::AsyncWriteExt + Unpin,
{
    runtime.begin_live_updates();

    loop {
        let response = Response::Status {
            display: runtime.display_state(),
        };
        // The timeout also covers a client that stopped reading: once the
        // socket buffer fills, the stalled write ends the session instead of
        // pinning the task (and the live-update counter) forever.
        if let Err(e) = protocol::write_response(writer, &response, DEFAULT_TIMEOUT).await {
            // A closed pipe is the normal way a watch ends.
            debug!("watch stream ended: {}", e);
            break;
        }
        tokio::time::sleep(WATCH_FRAME_INTERVAL).await;
    }

    runtime.end_live_updates();
    Ok(())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
