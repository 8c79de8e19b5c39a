//! SQLite-backed faucet stores. Survives restarts, so cooldowns and locales persist.
//!
//! External: SQLite via sqlx; one row per user in `rate_limits` and `user_locales`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{RateLimitRecord, UserLocale};
use crate::repository::{LocaleStore, RateLimitStore};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating faucet tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rate_limits (
                user_id INTEGER PRIMARY KEY,
                last_dispensed_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_locales (
                user_id INTEGER PRIMARY KEY,
                locale TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// All rate-limit rows, oldest first.
    pub async fn rate_limit_records(&self) -> Result<Vec<RateLimitRecord>, StorageError> {
        let rows = sqlx::query_as::<_, RateLimitRecord>(
            "SELECT user_id, last_dispensed_at FROM rate_limits ORDER BY last_dispensed_at ASC",
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl RateLimitStore for SqliteStore {
    async fn last_dispensed_at(&self, user_id: i64) -> Result<Option<DateTime<Utc>>, StorageError> {
        let row = sqlx::query_as::<_, RateLimitRecord>(
            "SELECT user_id, last_dispensed_at FROM rate_limits WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(row.map(|r| r.last_dispensed_at))
    }

    async fn record_dispensed(&self, user_id: i64, at: DateTime<Utc>) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO rate_limits (user_id, last_dispensed_at) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET last_dispensed_at = excluded.last_dispensed_at
            "#,
        )
        .bind(user_id)
        .bind(at)
        .execute(self.pool_manager.pool())
        .await?;

        debug!(user_id = user_id, at = %at, "Recorded dispensation");
        Ok(())
    }
}

#[async_trait]
impl LocaleStore for SqliteStore {
    async fn locale(&self, user_id: i64) -> Result<Option<String>, StorageError> {
        let row = sqlx::query_as::<_, UserLocale>(
            "SELECT user_id, locale FROM user_locales WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(row.map(|r| r.locale))
    }

    async fn set_locale(&self, user_id: i64, locale: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO user_locales (user_id, locale) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET locale = excluded.locale
            "#,
        )
        .bind(user_id)
        .bind(locale)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }
}
