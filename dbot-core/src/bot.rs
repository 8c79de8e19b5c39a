//! Bot abstraction for sending, deleting and reacting to messages.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute
//! recording mocks.

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// A single inline-keyboard button that fires a callback query with `callback_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

/// An outbound message: target chat, text, optional forum topic and one row of inline buttons.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub chat: Chat,
    pub text: String,
    pub thread_id: Option<i32>,
    pub buttons: Vec<InlineButton>,
}

impl OutgoingMessage {
    pub fn new(chat: Chat, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
            thread_id: None,
            buttons: Vec::new(),
        }
    }

    /// Reply into the same chat (and topic, when the message is a topic message) as `message`.
    pub fn reply_to(message: &Message, text: impl Into<String>) -> Self {
        Self {
            chat: message.chat.clone(),
            text: text.into(),
            thread_id: message.reply_thread_id(),
            buttons: Vec::new(),
        }
    }

    pub fn with_button(mut self, button: InlineButton) -> Self {
        self.buttons.push(button);
        self
    }
}

/// Abstraction over the chat transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a message and returns its transport id (Telegram numeric string) for later deletion.
    async fn send(&self, message: &OutgoingMessage) -> Result<String>;

    /// Sends a plain reply into the chat (and topic) of `message`.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<String> {
        self.send(&OutgoingMessage::reply_to(message, text)).await
    }

    /// Deletes a previously sent message.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;

    /// Sets a single emoji reaction on `message`.
    async fn react(&self, message: &Message, emoji: &str) -> Result<()>;
}

/// Parses a message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatKind, User};
    use chrono::Utc;

    fn topic_message(is_topic: bool) -> Message {
        Message {
            id: "10".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: None,
                last_name: None,
                language_code: None,
            },
            chat: Chat {
                id: -100,
                kind: ChatKind::Supergroup,
            },
            content: "/help".to_string(),
            thread_id: Some(7),
            is_topic_message: is_topic,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }

    #[test]
    fn test_reply_to_keeps_topic_only_for_topic_messages() {
        let reply = OutgoingMessage::reply_to(&topic_message(true), "hi");
        assert_eq!(reply.thread_id, Some(7));
        assert_eq!(reply.chat.id, -100);

        let reply = OutgoingMessage::reply_to(&topic_message(false), "hi");
        assert_eq!(reply.thread_id, None);
    }

    #[test]
    fn test_with_button_appends() {
        let reply = OutgoingMessage::reply_to(&topic_message(false), "hi").with_button(
            InlineButton {
                text: "Delete".to_string(),
                callback_data: "delete_1".to_string(),
            },
        );
        assert_eq!(reply.buttons.len(), 1);
        assert_eq!(reply.buttons[0].callback_data, "delete_1");
    }
}
