//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{CallbackQuery, Chat, ChatKind, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            language_code: self.0.language_code.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    let kind = if chat.is_private() {
        ChatKind::Private
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_channel() {
        ChatKind::Channel
    } else {
        ChatKind::Group
    };
    Chat { id: chat.id.0, kind }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Option<Message> {
        let user = TelegramUserWrapper(self.0.from.as_ref()?).to_core();
        Some(Message {
            id: self.0.id.to_string(),
            user,
            chat: core_chat(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
            thread_id: self.0.thread_id.map(|t| t.0 .0),
            is_topic_message: self.0.is_topic_message,
            created_at: self.0.date,
        })
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackQuery`].
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    pub fn to_core(&self) -> CallbackQuery {
        let message = self.0.message.as_ref();
        CallbackQuery {
            id: self.0.id.to_string(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            data: self.0.data.clone().unwrap_or_default(),
            chat: message.map(|m| core_chat(m.chat())),
            message_id: message.map(|m| m.id().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json() -> serde_json::Value {
        json!({
            "id": 42,
            "is_bot": false,
            "first_name": "Test",
            "language_code": "zh"
        })
    }

    fn topic_message_json() -> serde_json::Value {
        json!({
            "message_id": 77,
            "message_thread_id": 9,
            "is_topic_message": true,
            "date": 1_700_000_000,
            "chat": { "id": -100123, "type": "supergroup", "title": "Aptos", "is_forum": true },
            "from": from_json(),
            "text": "/faucet 0xa11ce"
        })
    }

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name, language_code.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let wrapper = TelegramUserWrapper(&user);
        let core_user = wrapper.to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
        assert_eq!(core_user.language_code.as_deref(), Some("en"));
    }

    /// **Test: a forum topic message keeps its thread id, chat kind and text.**
    #[test]
    fn test_topic_message_to_core() {
        let msg: teloxide::types::Message = serde_json::from_value(topic_message_json()).unwrap();

        let core = TelegramMessageWrapper(&msg).to_core().unwrap();

        assert_eq!(core.id, "77");
        assert_eq!(core.user.id, 42);
        assert_eq!(core.chat.id, -100123);
        assert_eq!(core.chat.kind, ChatKind::Supergroup);
        assert_eq!(core.content, "/faucet 0xa11ce");
        assert_eq!(core.reply_thread_id(), Some(9));
    }

    #[test]
    fn test_private_message_to_core() {
        let msg: teloxide::types::Message = serde_json::from_value(json!({
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": { "id": 42, "type": "private", "first_name": "Test" },
            "from": from_json(),
            "text": "/start"
        }))
        .unwrap();

        let core = TelegramMessageWrapper(&msg).to_core().unwrap();

        assert!(core.chat.is_private());
        assert!(!core.is_topic_message);
        assert_eq!(core.reply_thread_id(), None);
    }

    /// **Test: a message without a sender user (e.g. a channel post) is not converted.**
    #[test]
    fn test_message_without_sender_is_skipped() {
        let msg: teloxide::types::Message = serde_json::from_value(json!({
            "message_id": 3,
            "date": 1_700_000_000,
            "chat": { "id": -100555, "type": "channel", "title": "News" },
            "text": "/faucet 0xa11ce"
        }))
        .unwrap();

        assert!(TelegramMessageWrapper(&msg).to_core().is_none());
    }

    /// **Test: callback query carries data, requester and the message it is attached to.**
    #[test]
    fn test_callback_query_to_core() {
        let query: teloxide::types::CallbackQuery = serde_json::from_value(json!({
            "id": "cbq-1",
            "from": from_json(),
            "chat_instance": "instance",
            "data": "delete_42",
            "message": topic_message_json()
        }))
        .unwrap();

        let core = TelegramCallbackWrapper(&query).to_core();

        assert_eq!(core.id, "cbq-1");
        assert_eq!(core.user.id, 42);
        assert_eq!(core.data, "delete_42");
        assert_eq!(core.chat.as_ref().map(|c| c.id), Some(-100123));
        assert_eq!(core.message_id.as_deref(), Some("77"));
    }
}
