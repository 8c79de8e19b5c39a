//! Core types: user, chat, message, callback query, handler response, and the handler traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::Command;

/// User identity (id, username, names, client language).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// IETF language tag reported by the user's Telegram client (e.g. `en`, `zh-hans`).
    pub language_code: Option<String>,
}

/// Kind of chat a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Chat identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.kind == ChatKind::Private
    }
}

/// A single inbound message with user, chat, text and forum-topic context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    /// Forum topic the message was posted in, if any.
    pub thread_id: Option<i32>,
    /// True when the message belongs to a forum topic (replies go back into that topic).
    pub is_topic_message: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Parses the message text as a `/command args...`; `None` for plain text.
    pub fn command(&self) -> Option<Command> {
        Command::parse(&self.content)
    }

    /// Thread to reply into: the topic of the message when it is a topic message.
    pub fn reply_thread_id(&self) -> Option<i32> {
        if self.is_topic_message {
            self.thread_id
        } else {
            None
        }
    }
}

/// An inline-keyboard button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    /// User who pressed the button.
    pub user: User,
    pub data: String,
    /// Chat and message id of the message carrying the button; absent for inaccessible messages.
    pub chat: Option<Chat>,
    pub message_id: Option<String>,
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the text that was sent back to the user.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`]. `None` when the message has no
/// sender user (channel posts, anonymous admins), since per-user state cannot be keyed on it.
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Option<Message>;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Receives inline-keyboard button presses. The transport answers the query itself.
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    async fn handle_callback(&self, query: &CallbackQuery) -> crate::error::Result<()>;
}
