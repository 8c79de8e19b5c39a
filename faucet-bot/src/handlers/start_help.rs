//! `/start` and `/help`.

use async_trait::async_trait;
use dbot_core::{Command, Message, Result};
use tracing::debug;

use super::router::CommandHandler;
use crate::components::BotComponents;
use crate::format::{format_apt, format_duration};

/// Placeholders shared by the start and help texts.
fn intro_text(components: &BotComponents, locale: &str, key: &str) -> String {
    let amount = format_apt(components.faucet.amount());
    let cooldown = format_duration(components.faucet.cooldown());
    let network = components.network.to_string();
    components.localizer.t(
        locale,
        key,
        &[
            ("amount", amount.as_str()),
            ("cooldown", cooldown.as_str()),
            ("network", network.as_str()),
        ],
    )
}

/// Greets the user. Private chats only.
pub struct StartHandler {
    components: BotComponents,
}

impl StartHandler {
    pub fn new(components: BotComponents) -> Self {
        Self { components }
    }
}

#[async_trait]
impl CommandHandler for StartHandler {
    async fn handle_command(&self, message: &Message, _command: &Command) -> Result<()> {
        if !message.chat.is_private() {
            debug!(chat_id = message.chat.id, "Ignoring /start outside private chat");
            return Ok(());
        }
        let locale = self.components.localizer.locale_for(&message.user).await;
        let text = intro_text(&self.components, &locale, "start");
        self.components.bot.reply_to(message, &text).await?;
        Ok(())
    }
}

/// Shows usage. In groups the reply removes itself after the auto-delete delay.
pub struct HelpHandler {
    components: BotComponents,
}

impl HelpHandler {
    pub fn new(components: BotComponents) -> Self {
        Self { components }
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle_command(&self, message: &Message, _command: &Command) -> Result<()> {
        let locale = self.components.localizer.locale_for(&message.user).await;
        let text = intro_text(&self.components, &locale, "help");
        let sent_id = self.components.bot.reply_to(message, &text).await?;
        if !message.chat.is_private() {
            self.components.auto_delete.schedule(&message.chat, sent_id);
        }
        Ok(())
    }
}
