//! Deletes bot replies in group chats after a delay.

use dbot_core::{Bot, Chat};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct AutoDeleter {
    bot: Arc<dyn Bot>,
    delay: Duration,
}

impl AutoDeleter {
    pub fn new(bot: Arc<dyn Bot>, delay: Duration) -> Self {
        Self { bot, delay }
    }

    /// Deletes `message_id` after the delay. Failures (already deleted, missing rights) are logged only.
    pub fn schedule(&self, chat: &Chat, message_id: String) -> JoinHandle<()> {
        let bot = self.bot.clone();
        let chat = chat.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match bot.delete_message(&chat, &message_id).await {
                Ok(()) => debug!(chat_id = chat.id, message_id = %message_id, "Auto-deleted reply"),
                Err(e) => warn!(
                    chat_id = chat.id,
                    message_id = %message_id,
                    error = %e,
                    "Failed to auto-delete reply"
                ),
            }
        })
    }
}
