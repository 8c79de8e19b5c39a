//! Message and callback handlers: logging, the command router and one handler per command.

mod delete_callback;
mod faucet;
mod language;
mod logging;
mod router;
mod start_help;

pub use delete_callback::{delete_callback_data, parse_delete_callback, DeleteCallbackHandler};
pub use faucet::FaucetHandler;
pub use language::LanguageHandler;
pub use logging::LoggingHandler;
pub use router::{CommandHandler, CommandRouter};
pub use start_help::{HelpHandler, StartHandler};
