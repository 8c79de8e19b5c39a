//! Mock implementation of [`dbot_core::Bot`] for integration tests.
//!
//! Records every send, delete and reaction so tests can assert on replies without hitting Telegram.

use async_trait::async_trait;
use dbot_core::{Bot, Chat, Message, OutgoingMessage, Result};
use std::sync::Mutex;

/// One recorded `delete_message(chat, message_id)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRecord {
    pub chat_id: i64,
    pub message_id: String,
}

/// One recorded `react(message, emoji)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRecord {
    pub message_id: String,
    pub emoji: String,
}

/// Mock Bot that returns sequential message ids starting at 1000.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<(String, OutgoingMessage)>>,
    deleted: Mutex<Vec<DeleteRecord>>,
    reactions: Mutex<Vec<ReactionRecord>>,
}

#[allow(dead_code)] // not every test binary reads every record
impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(assigned message id, message)` in send order.
    pub fn sent(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_sent(&self) -> OutgoingMessage {
        self.sent().last().expect("no message sent").1.clone()
    }

    pub fn deleted(&self) -> Vec<DeleteRecord> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn reactions(&self) -> Vec<ReactionRecord> {
        self.reactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send(&self, message: &OutgoingMessage) -> Result<String> {
        let mut sent = self.sent.lock().unwrap();
        let id = (1000 + sent.len()).to_string();
        sent.push((id.clone(), message.clone()));
        Ok(id)
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(DeleteRecord {
            chat_id: chat.id,
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn react(&self, message: &Message, emoji: &str) -> Result<()> {
        self.reactions.lock().unwrap().push(ReactionRecord {
            message_id: message.id.clone(),
            emoji: emoji.to_string(),
        });
        Ok(())
    }
}
