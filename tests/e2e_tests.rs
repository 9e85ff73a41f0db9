//! End-to-End Tests for the countdown CLI.
//!
//! These tests run the compiled binary:
//! - Help and shell completions
//! - `wait` counting down to completion (plain and JSON)
//! - `wait` rejecting invalid durations
//! - `run` driven by scripted stdin

use assert_cmd::Command;
use predicates::prelude::*;

fn countdown() -> Command {
    Command::cargo_bin("countdown").unwrap()
}

// ============================================================================
// Help and Completions
// ============================================================================

#[test]
fn help_lists_subcommands() {
    countdown()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("wait"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn no_subcommand_prints_help() {
    countdown()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn completions_bash() {
    countdown()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("countdown"));
}

// ============================================================================
// Wait
// ============================================================================

/// Counts two seconds down on a fast tick and prints the alert once.
#[test]
fn wait_counts_down_and_alerts() {
    countdown()
        .args(["wait", "2", "--tick-ms", "10", "--no-bell"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("> started  00:00:02"))
        .stdout(predicate::str::contains("00:00:01"))
        .stdout(predicate::str::contains("00:00:00"))
        .stdout(predicate::str::contains("Timer completed! (00:00:02)").count(1));
}

/// JSON mode prints one event per line and keeps the alert off stdout.
#[test]
fn wait_json_events() {
    let output = countdown()
        .args(["wait", "--seconds", "2", "--tick-ms", "10", "--json", "--no-bell"])
        .timeout(std::time::Duration::from_secs(10))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let kinds: Vec<&str> = events
        .iter()
        .map(|event| event["event"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["configured", "started", "tick", "tick", "completed"]
    );
    assert_eq!(events[2]["remaining"]["seconds"], 1);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Timer completed!"));
}

#[test]
fn wait_zero_duration_fails() {
    countdown()
        .args(["wait", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to count down"));
}

#[test]
fn wait_out_of_range_duration_fails() {
    countdown()
        .args(["wait", "1:60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("minutes"));
}

// ============================================================================
// Run
// ============================================================================

#[test]
fn run_status_then_quit() {
    countdown()
        .args(["run", "--seconds", "1"])
        .write_stdin("status\nquit\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:00  [Set Timer] [Start] [Restart]"));
}

#[test]
fn run_ends_at_end_of_input() {
    countdown()
        .args(["run", "5:00"])
        .write_stdin("help\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("commands:"));
}

#[test]
fn run_reports_unknown_commands() {
    countdown()
        .arg("run")
        .write_stdin("launch\nquit\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown command 'launch'"));
}

#[test]
fn run_set_starts_counting() {
    countdown()
        .args(["run", "--tick-ms", "10"])
        .write_stdin("set 2\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("[Pause]"));
}
