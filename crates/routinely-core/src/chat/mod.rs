//! Chat message store and session state.
//!
//! Messages form an append-only sequence; ordering is arrival order and a
//! message is never mutated after it is appended.

pub mod session;

pub use session::{Session, SessionState};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Greeting appended as the first assistant message of every session.
pub const WELCOME_MESSAGE: &str = "\u{1f44b} Hi there! I'm your Daily Routine Assistant. \
I can help you plan your day based on your profession and tasks. \
Let's start by telling me your profession, or you can add tasks for tomorrow.";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message with a fresh id.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message with a fresh id.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only ordered list of chat turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history opened with the canned welcome message.
    pub fn with_welcome() -> Self {
        let mut history = Self::new();
        history.push(ChatMessage::assistant(WELCOME_MESSAGE));
        history
    }

    /// Append a message. The only mutation the store supports.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Content of the most recent user message, empty string if none.
    pub fn latest_user_content(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    /// The most recent assistant message, if any.
    pub fn latest_assistant(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl FromIterator<ChatMessage> for ChatHistory {
    fn from_iter<I: IntoIterator<Item = ChatMessage>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}
