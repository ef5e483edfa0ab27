//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn chime_no_args_shows_usage_and_fails() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn chime_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn chime_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("status")
        .stdout_has("watch")
        .stdout_has("interval")
        .stdout_has("alarm")
        .stdout_has("beep");
}

#[test]
fn chime_interval_help_shows_subcommands() {
    cli()
        .args(&["interval", "--help"])
        .passes()
        .stdout_has("on")
        .stdout_has("off")
        .stdout_has("toggle");
}

#[test]
fn chime_alarm_help_shows_subcommands() {
    cli()
        .args(&["alarm", "--help"])
        .passes()
        .stdout_has("on")
        .stdout_has("off")
        .stdout_has("toggle");
}

#[test]
fn chime_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
