//! Inline "delete" button under faucet success replies. Only the user who requested the tokens may
//! remove the message.

use async_trait::async_trait;
use dbot_core::{Bot, CallbackHandler, CallbackQuery, HandlerError, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const PREFIX: &str = "delete_";

/// Callback data for a delete button owned by `user_id`.
pub fn delete_callback_data(user_id: i64) -> String {
    format!("{}{}", PREFIX, user_id)
}

/// `None` when `data` is not a delete callback; `Some(Err)` when it is but the id is not a number.
pub fn parse_delete_callback(data: &str) -> Option<std::result::Result<i64, HandlerError>> {
    let id = data.strip_prefix(PREFIX)?;
    Some(
        id.parse()
            .map_err(|_| HandlerError::MalformedCallback(data.to_string())),
    )
}

pub struct DeleteCallbackHandler {
    bot: Arc<dyn Bot>,
}

impl DeleteCallbackHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CallbackHandler for DeleteCallbackHandler {
    #[instrument(skip(self, query), fields(user_id = query.user.id, data = %query.data))]
    async fn handle_callback(&self, query: &CallbackQuery) -> Result<()> {
        let Some(owner) = parse_delete_callback(&query.data) else {
            debug!("Unhandled callback data");
            return Ok(());
        };
        let owner = owner?;
        if owner != query.user.id {
            debug!(owner = owner, "Delete requested by someone other than the requester");
            return Ok(());
        }
        let (Some(chat), Some(message_id)) = (&query.chat, &query.message_id) else {
            debug!("Callback has no attached message");
            return Ok(());
        };
        self.bot.delete_message(chat, message_id).await?;
        info!(chat_id = chat.id, message_id = %message_id, "Deleted faucet reply on request");
        Ok(())
    }
}
