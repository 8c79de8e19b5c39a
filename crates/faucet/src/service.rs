use std::sync::Arc;
use tracing::{error, info};

use crate::clock::Clock;
use crate::dispenser::{DispenseReceipt, Dispenser};
use crate::error::FaucetError;
use crate::rate_limiter::RateLimiter;

/// One `/faucet` request end to end.
#[derive(Clone)]
pub struct Faucet {
    limiter: RateLimiter,
    dispenser: Dispenser,
    clock: Arc<dyn Clock>,
}

impl Faucet {
    pub fn new(limiter: RateLimiter, dispenser: Dispenser, clock: Arc<dyn Clock>) -> Self {
        Self {
            limiter,
            dispenser,
            clock,
        }
    }

    pub fn amount(&self) -> u64 {
        self.dispenser.amount()
    }

    pub fn cooldown(&self) -> std::time::Duration {
        self.limiter.cooldown()
    }

    /// Checks the rate limit, then the address, then dispenses. The user's cooldown starts only
    /// once the transfer is confirmed; every failure leaves it untouched.
    ///
    /// `address` is the first whitespace-separated argument of the command, if any.
    pub async fn request(
        &self,
        user_id: i64,
        address: Option<&str>,
    ) -> Result<DispenseReceipt, FaucetError> {
        self.limiter.check(user_id, self.clock.now()).await?;

        let address = address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(FaucetError::MissingAddress)?;

        let receipt = self.dispenser.dispense(address).await?;

        // Tokens are already sent; a store failure here must not turn into a failure reply.
        if let Err(e) = self.limiter.record(user_id, self.clock.now()).await {
            error!(user_id = user_id, error = %e, "Failed to record dispensation");
        }
        info!(
            user_id = user_id,
            hash = %receipt.transaction_hash,
            "Faucet request served"
        );
        Ok(receipt)
    }
}
