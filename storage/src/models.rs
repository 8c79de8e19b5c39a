//! Row models for the faucet stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last successful dispensation for a user. At most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RateLimitRecord {
    pub user_id: i64,
    pub last_dispensed_at: DateTime<Utc>,
}

/// Language a user picked with `/language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserLocale {
    pub user_id: i64,
    pub locale: String,
}
