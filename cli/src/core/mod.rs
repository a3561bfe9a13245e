//! # Folio Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the matcher, the chat session and the
//! command handlers:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Tera templates for every canned response
//!
//! ## Usage
//!
//! ```rust
//! use folio::core::config; // For loading configuration
//! use folio::core::error::{FolioError, Result}; // For error handling
//! use folio::core::templating; // For response templates
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
