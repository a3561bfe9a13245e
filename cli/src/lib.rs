//! # Folio
//!
//! File: cli/src/lib.rs
//!
//! Scripted portfolio assistant. Answers questions about one person from a
//! static profile using an ordered list of keyword rules and canned,
//! template-rendered responses.
//!
//! - `profile`: the profile facts the answers are built from
//! - `matcher`: the rule-based responder (`ResponseMatcher::respond`)
//! - `chat`: transcript and delayed-reply chat session
//! - `core`: config, errors, templating
//!
//! The `folio` binary (`main.rs` + `commands`) is a thin CLI over this library.

pub mod chat;
pub mod core;
pub mod matcher;
pub mod profile;
