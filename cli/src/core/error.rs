//! # Folio Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Folio. The matcher
//! itself cannot fail once it has been built, so every variant here belongs
//! to construction time (config, profile, templates, rule patterns) or to
//! the chat session surrounding the matcher.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `FolioError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! use anyhow::Context;
//! use folio::core::error::{FolioError, Result};
//!
//! fn read_profile(path: &std::path::Path) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read profile: {}", path.display()))?;
//!     if content.trim().is_empty() {
//!         return Err(FolioError::Profile("profile file is empty".into()).into());
//!     }
//!     Ok(content)
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Folio application.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Invalid rule pattern: {source}")]
    RulePattern {
        #[from]
        source: regex::Error,
    },

    #[error("Unknown topic '{name}'.")]
    UnknownTopic { name: String },

    #[error("Message is empty; nothing to send.")]
    EmptySubmission,

    #[error("Chat session is closed.")]
    SessionClosed,
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
