//! `/faucet <address>`.

use async_trait::async_trait;
use dbot_core::{Command, InlineButton, Message, OutgoingMessage, Result};
use faucet::{DispenseReceipt, FaucetError};
use tracing::{info, instrument, warn};

use super::delete_callback::delete_callback_data;
use super::router::CommandHandler;
use crate::components::BotComponents;
use crate::format::{format_apt, format_duration};

/// Reaction put on the user's command when tokens were sent.
pub const SUCCESS_REACTION: &str = "👌";

/// Sends testnet tokens to the first argument. In groups, error replies remove themselves after the
/// auto-delete delay and the success reply carries a delete button for the requester.
pub struct FaucetHandler {
    components: BotComponents,
}

impl FaucetHandler {
    pub fn new(components: BotComponents) -> Self {
        Self { components }
    }

    fn success_text(&self, locale: &str, receipt: &DispenseReceipt) -> String {
        let amount = format_apt(receipt.amount);
        let network = self.components.network.to_string();
        let explorer = self
            .components
            .network
            .explorer_url(&receipt.transaction_hash);
        self.components.localizer.t(
            locale,
            "faucet.success",
            &[
                ("amount", amount.as_str()),
                ("network", network.as_str()),
                ("hash", receipt.transaction_hash.as_str()),
                ("explorer", explorer.as_str()),
            ],
        )
    }

    fn error_text(&self, locale: &str, error: &FaucetError) -> String {
        let l10n = &self.components.localizer;
        match error {
            FaucetError::RateLimited { retry_after } => {
                let cooldown = format_duration(self.components.faucet.cooldown());
                let remaining = format_duration(*retry_after);
                l10n.t(
                    locale,
                    "faucet.too-frequent",
                    &[("cooldown", cooldown.as_str()), ("remaining", remaining.as_str())],
                )
            }
            FaucetError::MissingAddress => l10n.t(locale, "faucet.no-address", &[]),
            FaucetError::InvalidAddress(address) => {
                l10n.t(locale, "faucet.invalid-address", &[("address", address.as_str())])
            }
            FaucetError::SimulationFailed(reason) => {
                l10n.t(locale, "faucet.simulation-failed", &[("reason", reason.as_str())])
            }
            FaucetError::SubmissionFailed(_) => l10n.t(locale, "faucet.submission-failed", &[]),
            FaucetError::ConfirmationTimeout { hash } => {
                l10n.t(locale, "faucet.confirmation-timeout", &[("hash", hash.as_str())])
            }
            FaucetError::ConfirmationFailed { hash, .. } => {
                l10n.t(locale, "faucet.confirmation-failed", &[("hash", hash.as_str())])
            }
            FaucetError::TransactionFailed { hash, vm_status } => l10n.t(
                locale,
                "faucet.transaction-failed",
                &[("hash", hash.as_str()), ("reason", vm_status.as_str())],
            ),
            FaucetError::BuildFailed(_) | FaucetError::SigningFailed(_) | FaucetError::Store(_) => {
                l10n.t(locale, "faucet.failed", &[])
            }
        }
    }
}

#[async_trait]
impl CommandHandler for FaucetHandler {
    #[instrument(skip(self, message, command), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle_command(&self, message: &Message, command: &Command) -> Result<()> {
        let locale = self.components.localizer.locale_for(&message.user).await;
        let bot = &self.components.bot;

        match self
            .components
            .faucet
            .request(message.user.id, command.first_arg())
            .await
        {
            Ok(receipt) => {
                let mut reply =
                    OutgoingMessage::reply_to(message, self.success_text(&locale, &receipt));
                if !message.chat.is_private() {
                    reply = reply.with_button(InlineButton {
                        text: self.components.localizer.t(&locale, "faucet.delete-button", &[]),
                        callback_data: delete_callback_data(message.user.id),
                    });
                }
                bot.send(&reply).await?;
                if let Err(e) = bot.react(message, SUCCESS_REACTION).await {
                    warn!(error = %e, "Failed to react to faucet request");
                }
            }
            Err(e) => {
                info!(error = %e, "Faucet request refused");
                let sent_id = bot.reply_to(message, &self.error_text(&locale, &e)).await?;
                if !message.chat.is_private() {
                    self.components.auto_delete.schedule(&message.chat, sent_id);
                }
            }
        }
        Ok(())
    }
}
