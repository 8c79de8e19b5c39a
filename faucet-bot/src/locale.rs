//! Per-user reply language: stored choice, else Telegram client language, else the default.

use dbot_core::User;
use i18n::I18n;
use std::sync::Arc;
use storage::{LocaleStore, StorageError};
use tracing::warn;

pub struct Localizer {
    i18n: I18n,
    store: Arc<dyn LocaleStore>,
}

impl Localizer {
    pub fn new(i18n: I18n, store: Arc<dyn LocaleStore>) -> Self {
        Self { i18n, store }
    }

    /// A store failure degrades to client-language negotiation instead of failing the reply.
    pub async fn locale_for(&self, user: &User) -> String {
        let stored = match self.store.locale(user.id).await {
            Ok(locale) => locale,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Failed to read stored locale");
                None
            }
        };
        self.i18n
            .negotiate(stored.as_deref(), user.language_code.as_deref())
    }

    pub async fn set_locale(&self, user_id: i64, locale: &str) -> Result<(), StorageError> {
        self.store.set_locale(user_id, locale).await
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.i18n.has_locale(locale)
    }

    /// Available locales joined for display, e.g. `en, zh`.
    pub fn locale_list(&self) -> String {
        self.i18n.locales().join(", ")
    }

    pub fn t(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> String {
        self.i18n.t(locale, key, args)
    }
}
