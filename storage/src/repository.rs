use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;

/// Per-user timestamp of the last successful dispensation.
///
/// Writes are last-write-wins; implementations do not coordinate concurrent writers for the same user.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn last_dispensed_at(&self, user_id: i64) -> Result<Option<DateTime<Utc>>, StorageError>;
    async fn record_dispensed(&self, user_id: i64, at: DateTime<Utc>) -> Result<(), StorageError>;
}

/// Per-user locale preference.
#[async_trait]
pub trait LocaleStore: Send + Sync {
    async fn locale(&self, user_id: i64) -> Result<Option<String>, StorageError>;
    async fn set_locale(&self, user_id: i64, locale: &str) -> Result<(), StorageError>;
}
