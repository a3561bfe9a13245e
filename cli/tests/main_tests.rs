//! # Folio CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies the top-level behavior of the `folio` command-line interface:
//! standard flags like `--version` and `--help`, and argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    folio_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    folio_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ask")
            .and(predicate::str::contains("chat"))
            .and(predicate::str::contains("profile"))
            .and(predicate::str::contains("rules")),
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    folio_cmd()
        .arg("dance")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_missing_profile_file_reports_path() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--profile", "nope.toml", "ask", "hello"])
        .assert()
        .failure()
        .stderr(
            predicate::str::starts_with("Error:").and(predicate::str::contains("nope.toml")),
        );
}
