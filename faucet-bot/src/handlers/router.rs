//! Command dispatch table.

use async_trait::async_trait;
use dbot_core::{Command, Handler, HandlerResponse, Message, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Handles one bot command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle_command(&self, message: &Message, command: &Command) -> Result<()>;
}

/// Routes `/name args` to the handler registered for `name`. Text that is not a command, commands
/// nobody registered, and `/name@OtherBot` pass through untouched.
#[derive(Clone, Default)]
pub struct CommandRouter {
    routes: HashMap<String, Arc<dyn CommandHandler>>,
    bot_username: Option<String>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `name` (without the leading `/`). A later route for the same name replaces the earlier one.
    pub fn route(mut self, name: &str, handler: Arc<dyn CommandHandler>) -> Self {
        self.routes.insert(name.to_ascii_lowercase(), handler);
        self
    }

    /// Our own username; commands suffixed with any other `@name` are ignored.
    pub fn with_bot_username(mut self, bot_username: Option<String>) -> Self {
        self.bot_username = bot_username;
        self
    }
}

#[async_trait]
impl Handler for CommandRouter {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = message.command() else {
            return Ok(HandlerResponse::Continue);
        };
        if !command.is_addressed_to(self.bot_username.as_deref()) {
            debug!(command = %command.name, target = ?command.target, "Ignoring command for another bot");
            return Ok(HandlerResponse::Continue);
        }
        let Some(handler) = self.routes.get(&command.name) else {
            debug!(command = %command.name, "Ignoring unknown command");
            return Ok(HandlerResponse::Continue);
        };
        debug!(command = %command.name, args = %command.arg_text, "step: dispatching command");
        handler.handle_command(message, &command).await?;
        Ok(HandlerResponse::Stop)
    }
}
