//! Session Store for one interactive chat.
//!
//! Holds the ordered, committed turns of a conversation. Every other
//! component reads history from here and writes turns only through
//! [`Session::append`] / [`Session::commit`].

use std::fmt::Write;

use chrono::{DateTime, Local};
use uuid::Uuid;

use playground_types::chat::{MessageRole, Turn};
use playground_types::error::ChatError;
use playground_types::llm::Message;

/// Ordered sequence of committed turns, owned by a single interactive session.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Local>,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Local::now(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Add a fully-formed turn to the end of the sequence.
    ///
    /// User turns must have non-blank content; nothing else is validated.
    pub fn append(&mut self, turn: Turn) -> Result<(), ChatError> {
        if turn.role() == MessageRole::User && turn.content().trim().is_empty() {
            return Err(ChatError::InvalidTurn(
                "user message must not be empty".to_string(),
            ));
        }
        self.turns.push(turn);
        Ok(())
    }

    /// Stamp a new turn with the current time and append it.
    ///
    /// The timestamp never goes backwards relative to the previous turn, so
    /// commit order and timestamp order always agree.
    pub fn commit(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Result<&Turn, ChatError> {
        let now = Local::now();
        let timestamp = match self.turns.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        };
        self.append(Turn::with_timestamp(role, content, timestamp))?;
        Ok(&self.turns[self.turns.len() - 1])
    }

    /// Drop every turn. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Render the conversation as plain text, one block per turn:
    /// `[timestamp] You|Bot:\ncontent\n\n`.
    pub fn export(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            let _ = write!(
                out,
                "[{}] {}:\n{}\n\n",
                turn.formatted_timestamp(),
                turn.label(),
                turn.content()
            );
        }
        out
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The conversation as `{role, content}` pairs, timestamps stripped.
    pub fn history(&self) -> Vec<Message> {
        self.turns.iter().map(Turn::to_message).collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, minute, 0).unwrap()
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.is_empty());
        assert_eq!(session.export(), "");
    }

    #[test]
    fn test_last_is_most_recent_turn() {
        let mut session = Session::new();
        assert!(session.last().is_none());
        session.commit(MessageRole::User, "Hi").unwrap();
        session.commit(MessageRole::Assistant, "Hello!").unwrap();

        let last = session.last().unwrap();
        assert_eq!(last.role(), MessageRole::Assistant);
        assert_eq!(last.content(), "Hello!");
        assert!(last.timestamp() >= session.started_at());
    }

    #[test]
    fn test_export_single_turn_format() {
        let mut session = Session::new();
        session
            .append(Turn::with_timestamp(MessageRole::User, "Hi", at(5)))
            .unwrap();
        assert_eq!(session.export(), "[2025-06-01 12:05:00] You:\nHi\n\n");
    }

    #[test]
    fn test_export_n_blocks_in_append_order() {
        let mut session = Session::new();
        for i in 0..6u32 {
            let role = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            session
                .append(Turn::with_timestamp(role, format!("message {i}"), at(i)))
                .unwrap();
        }

        let export = session.export();
        let blocks: Vec<&str> = export
            .strip_suffix("\n\n")
            .unwrap()
            .split("\n\n")
            .collect();
        assert_eq!(blocks.len(), 6);
        for (i, block) in blocks.iter().enumerate() {
            let label = if i % 2 == 0 { "You" } else { "Bot" };
            assert_eq!(
                *block,
                format!("[2025-06-01 12:{i:02}:00] {label}:\nmessage {i}")
            );
        }
    }

    #[test]
    fn test_export_multiline_content() {
        let mut session = Session::new();
        session
            .append(Turn::with_timestamp(
                MessageRole::Assistant,
                "line one\nline two",
                at(1),
            ))
            .unwrap();
        assert_eq!(
            session.export(),
            "[2025-06-01 12:01:00] Bot:\nline one\nline two\n\n"
        );
    }

    #[test]
    fn test_clear_then_export_is_empty() {
        let mut session = Session::new();
        session.commit(MessageRole::User, "Hello").unwrap();
        session.commit(MessageRole::Assistant, "Hi!").unwrap();
        session.clear();
        assert_eq!(session.export(), "");
        assert!(session.is_empty());

        // Idempotent
        session.clear();
        assert_eq!(session.export(), "");
    }

    #[test]
    fn test_empty_user_turn_rejected() {
        let mut session = Session::new();
        let err = session.append(Turn::user("   ")).unwrap_err();
        assert!(matches!(err, ChatError::InvalidTurn(_)));
        assert!(session.is_empty());
    }

    #[test]
    fn test_empty_assistant_turn_allowed() {
        let mut session = Session::new();
        session.append(Turn::assistant("")).unwrap();
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_commit_never_goes_back_in_time() {
        let mut session = Session::new();
        let future = Local::now() + chrono::Duration::hours(1);
        session
            .append(Turn::with_timestamp(MessageRole::User, "from the future", future))
            .unwrap();

        let committed = session.commit(MessageRole::Assistant, "reply").unwrap();
        assert!(committed.timestamp() >= future);
    }

    #[test]
    fn test_history_strips_timestamps() {
        let mut session = Session::new();
        session.commit(MessageRole::User, "Hi").unwrap();
        session.commit(MessageRole::Assistant, "Hello!").unwrap();

        assert_eq!(
            session.history(),
            vec![Message::user("Hi"), Message::assistant("Hello!")]
        );
    }
}
