// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! chime - hour-mark and interval chime CLI

mod client;
mod daemon_process;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::client::{ClientError, DaemonClient};
use chime_daemon::{Request, Response};

#[derive(Parser)]
#[command(
    name = "chime",
    version,
    about = "Chime - periodic and hour-mark notification schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current countdowns and enabled schedules
    Status,
    /// Stream live countdowns until interrupted
    Watch,
    /// Manage interval schedules (every N minutes)
    Interval(IntervalArgs),
    /// Manage hour-mark schedules (at :MM past each hour)
    Alarm(AlarmArgs),
    /// Chime once, right now
    Beep,
    /// Stop the daemon
    Shutdown,
}

#[derive(Args)]
struct IntervalArgs {
    #[command(subcommand)]
    action: IntervalAction,
}

#[derive(Subcommand)]
enum IntervalAction {
    /// Enable an interval
    On {
        /// Period in minutes
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        minutes: u32,
    },
    /// Disable an interval
    Off {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        minutes: u32,
    },
    /// Flip an interval on or off
    Toggle {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        minutes: u32,
    },
}

#[derive(Args)]
struct AlarmArgs {
    #[command(subcommand)]
    action: AlarmAction,
}

#[derive(Subcommand)]
enum AlarmAction {
    /// Enable an hour mark
    On {
        /// Minute past the hour (0-59)
        #[arg(value_parser = clap::value_parser!(u32).range(0..=59))]
        minutes: u32,
    },
    /// Disable an hour mark
    Off {
        #[arg(value_parser = clap::value_parser!(u32).range(0..=59))]
        minutes: u32,
    },
    /// Flip an hour mark on or off
    Toggle {
        #[arg(value_parser = clap::value_parser!(u32).range(0..=59))]
        minutes: u32,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => {
            let client = match DaemonClient::for_query() {
                Ok(client) => client,
                Err(ClientError::DaemonNotRunning) => {
                    println!("chimed is not running");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            print_status(&client).await?;
        }

        Commands::Watch => watch(&DaemonClient::for_query()?).await?,

        Commands::Interval(args) => {
            let request = match args.action {
                IntervalAction::On { minutes } => Request::IntervalEnable {
                    period_minutes: minutes,
                },
                IntervalAction::Off { minutes } => Request::IntervalDisable {
                    period_minutes: minutes,
                },
                IntervalAction::Toggle { minutes } => Request::IntervalToggle {
                    period_minutes: minutes,
                },
            };
            mutate(request).await?;
        }

        Commands::Alarm(args) => {
            let request = match args.action {
                AlarmAction::On { minutes } => Request::AlarmEnable {
                    offset_minutes: minutes,
                },
                AlarmAction::Off { minutes } => Request::AlarmDisable {
                    offset_minutes: minutes,
                },
                AlarmAction::Toggle { minutes } => Request::AlarmToggle {
                    offset_minutes: minutes,
                },
            };
            mutate(request).await?;
        }

        Commands::Beep => {
            let client = DaemonClient::for_action()?;
            client.request(&Request::Chime).await?;
        }

        Commands::Shutdown => {
            let client = match DaemonClient::for_query() {
                Ok(client) => client,
                Err(ClientError::DaemonNotRunning) => {
                    println!("chimed is not running");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            client.request(&Request::Shutdown).await?;
            println!("chimed stopping");
        }
    }

    Ok(())
}

/// Apply a mutation, then show the resulting schedule state.
async fn mutate(request: Request) -> Result<()> {
    let client = DaemonClient::for_action()?;
    client.request(&request).await?;
    print_status(&client).await
}

async fn print_status(client: &DaemonClient) -> Result<()> {
    match client.request(&Request::Status).await? {
        Response::Status { display } => {
            println!("{}", output::render_status(&display));
            Ok(())
        }
        _ => Err(ClientError::UnexpectedResponse.into()),
    }
}

/// Stream display frames, redrawing the terminal on each one.
async fn watch(client: &DaemonClient) -> Result<()> {
    let mut stream = client.watch().await?;

    loop {
        let frame = match DaemonClient::next_frame(&mut stream).await {
            Ok(frame) => frame,
            // The daemon going away ends the watch, not an error.
            Err(ClientError::Protocol(_)) => break,
            Err(e) => return Err(e.into()),
        };

        if let Response::Status { display } = frame {
            // Clear screen and home the cursor before redrawing.
            print!("\x1b[2J\x1b[1;1H");
            println!("{}", output::render_status(&display));
        }
    }

    Ok(())
}
