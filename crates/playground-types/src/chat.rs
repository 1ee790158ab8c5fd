//! Chat turn types for LLM Playground.
//!
//! A [`Turn`] is one committed message in a conversation. Turns are
//! immutable: the content and timestamp are fixed at construction, and the
//! only way to "change" the conversation is to append a new turn or clear
//! the session.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

use crate::llm::Message;

/// Timestamp format used in the conversation export and on-screen turn headers.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One committed message (user or assistant) in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: MessageRole,
    content: String,
    timestamp: DateTime<Local>,
}

impl Turn {
    /// Build a turn stamped with the current local time.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self::with_timestamp(role, content, Local::now())
    }

    /// Build a turn with an explicit timestamp.
    pub fn with_timestamp(
        role: MessageRole,
        content: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// The timestamp rendered with [`TIMESTAMP_FORMAT`].
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Speaker label shown in the export artifact: `You` or `Bot`.
    pub fn label(&self) -> &'static str {
        match self.role {
            MessageRole::User => "You",
            MessageRole::Assistant => "Bot",
        }
    }

    /// Project this turn onto the wire shape, dropping the timestamp.
    pub fn to_message(&self) -> Message {
        Message {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_formatted_timestamp() {
        let turn = Turn::with_timestamp(MessageRole::User, "Hi", fixed_time());
        assert_eq!(turn.formatted_timestamp(), "2025-03-14 09:26:53");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Turn::user("a").label(), "You");
        assert_eq!(Turn::assistant("b").label(), "Bot");
    }

    #[test]
    fn test_to_message_strips_timestamp() {
        let turn = Turn::with_timestamp(MessageRole::Assistant, "Hello", fixed_time());
        let msg = turn.to_message();
        assert_eq!(msg, Message::assistant("Hello"));
        // The source turn is untouched.
        assert_eq!(turn.content(), "Hello");
        assert_eq!(turn.timestamp(), fixed_time());
    }

    #[test]
    fn test_turn_serde_roundtrip() {
        let turn = Turn::with_timestamp(MessageRole::User, "What is Rust?", fixed_time());
        let json = serde_json::to_string(&turn).unwrap();
        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turn);
    }
}
