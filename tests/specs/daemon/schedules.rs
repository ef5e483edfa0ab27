//! Schedule manipulation specs
//!
//! Black-box checks of the enable/disable/toggle commands and the
//! status display, driven through a real daemon.

use crate::prelude::*;

#[test]
fn fresh_daemon_has_the_hour_mark_armed() {
    let daemon = DaemonGuard::start();

    // The daemon arms :00 by default on startup.
    daemon
        .chime()
        .args(&["status"])
        .passes()
        .stdout_has("hour mark")
        .stdout_has("[:00]");
}

#[test]
fn interval_on_shows_up_in_status() {
    let daemon = DaemonGuard::start();

    daemon
        .chime()
        .args(&["interval", "on", "15"])
        .passes()
        .stdout_has("[15m]");

    daemon
        .chime()
        .args(&["status"])
        .passes()
        .stdout_has("interval")
        .stdout_has("[15m]");
}

#[test]
fn interval_off_removes_the_schedule() {
    let daemon = DaemonGuard::start();

    daemon.chime().args(&["interval", "on", "15"]).passes();
    daemon
        .chime()
        .args(&["interval", "off", "15"])
        .passes()
        .stdout_lacks("[15m]");
}

#[test]
fn toggle_flips_an_interval_on_and_off() {
    let daemon = DaemonGuard::start();

    daemon
        .chime()
        .args(&["interval", "toggle", "30"])
        .passes()
        .stdout_has("[30m]");

    daemon
        .chime()
        .args(&["interval", "toggle", "30"])
        .passes()
        .stdout_lacks("[30m]");
}

#[test]
fn multiple_intervals_are_listed_in_order() {
    let daemon = DaemonGuard::start();

    daemon.chime().args(&["interval", "on", "30"]).passes();
    daemon
        .chime()
        .args(&["interval", "on", "15"])
        .passes()
        .stdout_has("[15m 30m]");
}

#[test]
fn alarm_toggle_disables_the_default_mark() {
    let daemon = DaemonGuard::start();

    daemon
        .chime()
        .args(&["alarm", "toggle", "0"])
        .passes()
        .stdout_lacks("hour mark");
}

#[test]
fn alarm_on_adds_a_second_mark() {
    let daemon = DaemonGuard::start();

    daemon
        .chime()
        .args(&["alarm", "on", "30"])
        .passes()
        .stdout_has(":00 :30");
}

#[test]
fn beep_succeeds_against_a_running_daemon() {
    let daemon = DaemonGuard::start();
    daemon.chime().args(&["beep"]).passes();
}
