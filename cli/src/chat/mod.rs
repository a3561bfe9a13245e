//! # Folio Chat Session
//!
//! File: cli/src/chat/mod.rs
//!
//! ## Overview
//!
//! The conversation surrounding the matcher: an append-only transcript of
//! user and assistant turns, and a session that answers each submitted
//! message after a simulated "thinking" delay.
//!
//! - `transcript`: `Role`, `ConversationTurn` and the append-only `Transcript`.
//! - `session`: `ChatSession` and the cancellable `PendingReply` handle.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use folio::chat::ChatSession;
//! use folio::matcher::{MatcherOptions, ResponseMatcher};
//! use folio::profile::ProfileFacts;
//! use std::{sync::Arc, time::Duration};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let profile = ProfileFacts::sample()?;
//! let matcher = Arc::new(ResponseMatcher::new(&profile, &MatcherOptions::default())?);
//! let mut session = ChatSession::new(matcher, Duration::from_millis(500));
//!
//! session.submit("What are your skills?")?;
//! if let Some(turn) = session.next_reply().await {
//!     println!("{}", turn.text);
//! }
//! session.close();
//! # Ok(())
//! # }
//! ```
//!
pub mod session;
pub mod transcript;

pub use session::{ChatSession, PendingReply};
pub use transcript::{ConversationTurn, Role, Transcript};
