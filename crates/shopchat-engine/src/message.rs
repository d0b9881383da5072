//! Messages and the append-only message log.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the person using the widget.
    User,
    /// Produced by the chat service (or the fallback on failure).
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Bot => write!(f, "bot"),
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    /// Create a user-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// Create a bot-authored message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered record of exchanged messages, oldest first.
///
/// Entries can only be appended, and only from inside the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log opening with a bot greeting. An empty greeting yields an empty log.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut log = Self::new();
        if !greeting.is_empty() {
            log.push(Message::bot(greeting));
        }
        log
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("10 pages please");
        assert_eq!(user.sender(), Sender::User);
        assert_eq!(user.text(), "10 pages please");

        let bot = Message::bot("Total: 30");
        assert_eq!(bot.sender(), Sender::Bot);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Message::bot("hi")).unwrap();
        assert_eq!(json, r#"{"sender":"bot","text":"hi"}"#);
        assert_eq!(Sender::User.to_string(), "user");
    }

    #[test]
    fn test_log_with_greeting() {
        let log = MessageLog::with_greeting("Hello!");
        assert_eq!(log.len(), 1);
        assert_eq!(log.last(), Some(&Message::bot("Hello!")));

        assert!(MessageLog::with_greeting("").is_empty());
    }

    #[test]
    fn test_log_preserves_insertion_order() {
        let mut log = MessageLog::new();
        log.push(Message::user("a"));
        log.push(Message::bot("b"));
        log.push(Message::user("a"));

        let texts: Vec<&str> = log.iter().map(Message::text).collect();
        assert_eq!(texts, vec!["a", "b", "a"]);
        assert_eq!(log.get(1).map(Message::sender), Some(Sender::Bot));
    }
}
