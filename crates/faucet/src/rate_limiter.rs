//! Per-user cooldown between successful dispensations.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use storage::RateLimitStore;
use tracing::debug;

use crate::error::FaucetError;

/// Allows a user to receive tokens once per `cooldown`. Only [`RateLimiter::record`] moves the
/// window; a check never writes.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    cooldown: Duration,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, cooldown: Duration) -> Self {
        Self { store, cooldown }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Time left before `user_id` may receive tokens again; `None` when allowed now.
    pub async fn remaining(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Duration>, FaucetError> {
        let Some(last) = self.store.last_dispensed_at(user_id).await? else {
            return Ok(None);
        };
        // A record in the future (clock moved backwards) counts as zero elapsed.
        let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
        if elapsed < self.cooldown {
            Ok(Some(self.cooldown - elapsed))
        } else {
            Ok(None)
        }
    }

    pub async fn allow(&self, user_id: i64, now: DateTime<Utc>) -> Result<bool, FaucetError> {
        Ok(self.remaining(user_id, now).await?.is_none())
    }

    /// `Err(RateLimited)` when the user is still cooling down.
    pub async fn check(&self, user_id: i64, now: DateTime<Utc>) -> Result<(), FaucetError> {
        match self.remaining(user_id, now).await? {
            None => Ok(()),
            Some(retry_after) => {
                debug!(
                    user_id = user_id,
                    retry_after_secs = retry_after.as_secs(),
                    "Rate limited"
                );
                Err(FaucetError::RateLimited { retry_after })
            }
        }
    }

    /// Starts a new cooldown for `user_id` at `now`. Call only after a successful dispensation.
    pub async fn record(&self, user_id: i64, now: DateTime<Utc>) -> Result<(), FaucetError> {
        self.store.record_dispensed(user_id, now).await?;
        Ok(())
    }
}
