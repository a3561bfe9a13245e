//! # Folio CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`ask.rs`, `chat.rs`, ...).
//! Every command built here runs inside a temporary directory with the user
//! config directory redirected, so a developer's own `.folio.toml` or
//! `~/.config/folio/config.toml` cannot leak into the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get Folio Command (`folio_cmd`)
///
/// An `assert_cmd::Command` for the compiled `folio` binary, with the
/// `FOLIO_*` environment variables cleared.
///
/// ## Panics
/// Panics if the `folio` binary cannot be found via `Command::cargo_bin`.
pub fn folio_cmd() -> Command {
    let mut cmd = Command::cargo_bin("folio").expect("Failed to find folio binary for testing");
    cmd.env_remove("FOLIO_CONFIG")
        .env_remove("FOLIO_PROFILE")
        .env_remove("RUST_LOG");
    cmd
}

/// A scratch workspace: the command's working directory and XDG config home.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // Stop the project-config search from walking above the sandbox.
        fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` inside the sandbox and returns the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write sandbox file");
        path
    }

    /// `folio_cmd()` running inside the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = folio_cmd();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("HOME", self.path());
        cmd
    }
}

/// A small profile distinct from the bundled sample.
pub const TEST_PROFILE: &str = r#"
name = "Jordan Lee"
email = "jordan@example.net"
phone = "+44 20 7946 0000"
location = "Leeds"

[education]
university = "Northern University"
status = "Second Year Student"
focus = "Distributed Systems"

[[languages]]
name = "English"
level = "Native"

[[projects]]
name = "Tiny Raft"
tech = ["Rust", "Tokio"]

[[interests]]
area = "Climbing"
details = "Weekends at the crag"
"#;
