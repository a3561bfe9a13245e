//! Append-only conversation log for one chat session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Ordered turns of a session. Turns can be appended but never edited or removed,
/// and only the owning session appends.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn append(&mut self, role: Role, text: impl Into<String>) -> &ConversationTurn {
        self.turns.push(ConversationTurn {
            role,
            text: text.into(),
            at: Utc::now(),
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Turns by `role`, in order.
    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter().filter(move |t| t.role == role)
    }
}
