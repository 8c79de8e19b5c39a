//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, Message, OutgoingMessage, Result};
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ReactionType, ReplyMarkup,
    ThreadId,
};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_error(e: teloxide::RequestError) -> DbotError {
    DbotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send(&self, message: &OutgoingMessage) -> Result<String> {
        let mut req = self
            .bot
            .send_message(ChatId(message.chat.id), message.text.clone());

        if let Some(thread_id) = message.thread_id {
            req.message_thread_id = Some(ThreadId(MessageId(thread_id)));
        }

        if !message.buttons.is_empty() {
            let rows = message
                .buttons
                .iter()
                .map(|b| vec![InlineKeyboardButton::callback(b.text.clone(), b.callback_data.clone())])
                .collect::<Vec<_>>();
            req.reply_markup = Some(ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows)));
        }

        let sent = req.await.map_err(bot_error)?;
        Ok(sent.id.to_string())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn react(&self, message: &Message, emoji: &str) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        let mut req = self
            .bot
            .set_message_reaction(ChatId(message.chat.id), MessageId(id));
        req.reaction = Some(vec![ReactionType::Emoji {
            emoji: emoji.to_string(),
        }]);
        req.await.map_err(bot_error)?;
        Ok(())
    }
}
