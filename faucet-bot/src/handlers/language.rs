//! `/language [code]`: show or change the user's reply language. Private chats only.

use async_trait::async_trait;
use dbot_core::{Command, DbotError, Message, Result};
use tracing::{debug, info};

use super::router::CommandHandler;
use crate::components::BotComponents;

pub struct LanguageHandler {
    components: BotComponents,
}

impl LanguageHandler {
    pub fn new(components: BotComponents) -> Self {
        Self { components }
    }
}

#[async_trait]
impl CommandHandler for LanguageHandler {
    async fn handle_command(&self, message: &Message, command: &Command) -> Result<()> {
        if !message.chat.is_private() {
            debug!(chat_id = message.chat.id, "Ignoring /language outside private chat");
            return Ok(());
        }
        let l10n = &self.components.localizer;
        let current = l10n.locale_for(&message.user).await;
        let locales = l10n.locale_list();

        let text = match command.first_arg() {
            None => l10n.t(
                &current,
                "language.specify-a-locale",
                &[("locales", locales.as_str())],
            ),
            Some(requested) if !l10n.has_locale(requested) => l10n.t(
                &current,
                "language.invalid-locale",
                &[("locales", locales.as_str())],
            ),
            Some(requested) if requested == current => {
                l10n.t(&current, "language.already-set", &[("locale", requested)])
            }
            Some(requested) => {
                l10n.set_locale(message.user.id, requested)
                    .await
                    .map_err(|e| DbotError::Storage(e.to_string()))?;
                info!(user_id = message.user.id, locale = requested, "Locale changed");
                // Confirm in the language just chosen.
                l10n.t(requested, "language.language-set", &[("locale", requested)])
            }
        };

        self.components.bot.reply_to(message, &text).await?;
        Ok(())
    }
}
