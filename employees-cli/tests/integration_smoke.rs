//! Smoke tests to verify command wiring

use std::time::{Duration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("employees").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("employees").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--legacy"))
        .stdout(predicate::str::contains("--memory"))
        .stdout(predicate::str::contains("--connect-attempts"));
}

#[test]
fn test_invalid_bind_rejected() {
    let mut cmd = Command::cargo_bin("employees").unwrap();
    cmd.arg("serve").arg("--memory").arg("--bind").arg("not-an-address");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unreachable_database_exits_nonzero() {
    let mut cmd = Command::cargo_bin("employees").unwrap();
    cmd.env("DB_HOST", "127.0.0.1")
        .env("DB_PORT", "1")
        .arg("init")
        .arg("--connect-attempts")
        .arg("1");

    let started = Instant::now();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect to database"))
        .stderr(predicate::str::contains("pool timed out").not());

    // one refused attempt plus the 1s backoff
    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
}
