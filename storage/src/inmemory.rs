//! In-memory store: a map per concern behind `tokio::sync::RwLock`. State is lost on restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::repository::{LocaleStore, RateLimitStore};

/// Unbounded in-memory implementation of [`RateLimitStore`] and [`LocaleStore`]. Entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    dispensed: Arc<RwLock<HashMap<i64, DateTime<Utc>>>>,
    locales: Arc<RwLock<HashMap<i64, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a rate-limit record.
    pub async fn rate_limit_len(&self) -> usize {
        self.dispensed.read().await.len()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryStore {
    async fn last_dispensed_at(&self, user_id: i64) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(self.dispensed.read().await.get(&user_id).copied())
    }

    async fn record_dispensed(&self, user_id: i64, at: DateTime<Utc>) -> Result<(), StorageError> {
        self.dispensed.write().await.insert(user_id, at);
        Ok(())
    }
}

#[async_trait]
impl LocaleStore for InMemoryStore {
    async fn locale(&self, user_id: i64) -> Result<Option<String>, StorageError> {
        Ok(self.locales.read().await.get(&user_id).cloned())
    }

    async fn set_locale(&self, user_id: i64, locale: &str) -> Result<(), StorageError> {
        self.locales
            .write()
            .await
            .insert(user_id, locale.to_string());
        Ok(())
    }
}
