pub mod mock_bot;
pub mod mock_ledger;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use dbot_core::{Chat, ChatKind, Message, User};
use dbot_telegram::TelegramConfig;
use faucet::ManualClock;
use faucet_bot::{assemble_components, BotComponents, FaucetBotConfig, StoreType, Stores};
use ledger_client::Network;
use storage::InMemoryStore;

use mock_bot::MockBot;
use mock_ledger::ScriptedLedger;

pub const REQUESTER: i64 = 42;
pub const OTHER_USER: i64 = 43;
pub const TOPIC: i32 = 9;
pub const BOT_USERNAME: &str = "AptosFaucetBot";

pub fn test_config() -> FaucetBotConfig {
    FaucetBotConfig {
        telegram: TelegramConfig::with_token("123456:test".to_string()),
        faucet_private_key: format!("0x{}", "07".repeat(32)),
        network: Network::Testnet,
        node_url: None,
        faucet_amount: 10_000_000,
        cooldown_secs: 3600,
        auto_delete_secs: 5,
        confirmation_timeout_secs: 20,
        store_type: StoreType::Memory,
        database_url: "./data/faucet.db".to_string(),
        default_locale: "en".to_string(),
        log_file: "logs/faucet-bot.log".to_string(),
    }
}

pub struct TestBot {
    pub components: BotComponents,
    pub bot: Arc<MockBot>,
    pub ledger: Arc<ScriptedLedger>,
    pub clock: Arc<ManualClock>,
}

pub fn test_bot(ledger: Arc<ScriptedLedger>) -> TestBot {
    let bot = Arc::new(MockBot::new());
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let components = assemble_components(
        &test_config(),
        bot.clone(),
        ledger.clone(),
        Stores {
            rate_limits: store.clone(),
            locales: store,
        },
        clock.clone(),
    )
    .unwrap()
    .with_bot_username(Some(BOT_USERNAME.to_string()));
    TestBot {
        components,
        bot,
        ledger,
        clock,
    }
}

pub fn private_chat(user_id: i64) -> Chat {
    Chat {
        id: user_id,
        kind: ChatKind::Private,
    }
}

pub fn group_chat() -> Chat {
    Chat {
        id: -100123,
        kind: ChatKind::Supergroup,
    }
}

pub fn user(id: i64, language_code: Option<&str>) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: None,
        language_code: language_code.map(str::to_string),
    }
}

/// Message from `user_id` in `chat`; group messages are posted in forum topic [`TOPIC`].
pub fn message(chat: Chat, user_id: i64, text: &str) -> Message {
    let in_topic = !chat.is_private();
    Message {
        id: "500".to_string(),
        user: user(user_id, None),
        chat,
        content: text.to_string(),
        thread_id: in_topic.then_some(TOPIC),
        is_topic_message: in_topic,
        created_at: Utc::now(),
    }
}
