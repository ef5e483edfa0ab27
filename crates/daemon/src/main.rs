// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chime Daemon (chimed)
//!
//! Background process that owns the schedule state and fires notifications.
//!
//! Architecture:
//! - Listener Task: Spawned task handling socket I/O, applying client
//!   events to the shared runtime
//! - Engine Loop: Main task draining due deadlines on a 1-second tick
//!   and waiting for shutdown

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;
use std::time::Duration;

use chime_core::{Clock, Event};
use chime_daemon::lifecycle::{self, Config, LifecycleError, StartupResult};
use chime_daemon::listener::Listener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;
use tracing::{error, info, warn};

/// The hour mark armed when the daemon starts with no other state: chime
/// on the hour.
const DEFAULT_ALARM_OFFSET: u32 = 0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config/lock acquisition
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("chimed {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("chimed {}", env!("CARGO_PKG_VERSION"));
                println!("Chime Daemon - background process that fires interval and hour-mark notifications");
                println!();
                println!("USAGE:");
                println!("    chimed");
                println!();
                println!("The daemon is typically started by the `chime` CLI and should not");
                println!("be invoked directly. It listens on a Unix socket for commands");
                println!("from `chime`.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: chimed [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    // Load configuration (user-level daemon)
    let config = Config::load()?;

    // Set up logging
    let log_guard = setup_logging(&config)?;

    info!("Starting user-level daemon");

    // Start daemon
    let StartupResult {
        mut daemon,
        listener: unix_listener,
    } = match lifecycle::startup(&config) {
        Ok(r) => r,
        Err(LifecycleError::LockFailed(_)) => {
            // Another daemon is already running — print a human-readable
            // message instead of a raw debug error.
            let pid = std::fs::read_to_string(&config.lock_path)
                .unwrap_or_default()
                .trim()
                .to_string();

            eprintln!("chimed is already running");
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    // Shutdown signal from the listener's Shutdown request handler
    let shutdown_notify = Arc::new(Notify::new());

    // Spawn listener task
    let listener = Listener::new(
        unix_listener,
        Arc::clone(&daemon.runtime),
        Arc::clone(&shutdown_notify),
    );
    tokio::spawn(listener.run());

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    // Arm the default schedule: a chime on the hour
    if let Err(e) = daemon
        .runtime
        .process_event(Event::AlarmEnabled {
            offset_minutes: DEFAULT_ALARM_OFFSET,
        })
        .await
    {
        warn!("Failed to arm default hour-mark alarm: {}", e);
    }

    info!(
        "Daemon ready, listening on {}",
        config.socket_path.display()
    );

    // Signal ready for parent process (e.g., systemd, CLI waiting for startup)
    println!("READY");

    // Timer check interval (1-second resolution)
    // NOTE: Must be created outside the loop - tokio::select! re-evaluates
    // branches on each iteration, so using sleep() inside would reset on
    // every event, causing timers to never fire during activity.
    let mut timer_check = tokio::time::interval(Duration::from_secs(1));

    // Engine loop - drains due deadlines and waits for shutdown
    loop {
        tokio::select! {
            // Shutdown requested via command
            _ = shutdown_notify.notified() => {
                info!("Shutdown requested via command");
                break;
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }

            // Fire due deadlines periodically (1-second resolution)
            _ = timer_check.tick() => {
                let now = daemon.runtime.clock().now();
                let timer_events = {
                    let scheduler = daemon.runtime.scheduler();
                    let mut scheduler = scheduler.lock();
                    scheduler.fired_timers(now)
                };
                for event in timer_events {
                    if let Err(e) = daemon.runtime.process_event(event).await {
                        error!("Error processing due timer: {}", e);
                    }
                }
            }
        }
    }

    // Graceful shutdown
    daemon.shutdown();
    info!("Daemon stopped");
    Ok(())
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Set up file appender
    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        config
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
