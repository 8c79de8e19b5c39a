//! # Faucet
//!
//! The faucet's own logic, independent of chat transport:
//!
//! - [`RateLimiter`] – one dispensation per user per cooldown, over an injected
//!   [`storage::RateLimitStore`]
//! - [`Dispenser`] – build → simulate → sign → submit → confirm over a [`ledger_client::LedgerClient`]
//! - [`Faucet`] – a single `/faucet` request: rate limit, address, dispense, record

mod clock;
mod dispenser;
mod error;
mod rate_limiter;
mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dispenser::{DispenseReceipt, Dispenser, Stage};
pub use error::FaucetError;
pub use rate_limiter::RateLimiter;
pub use service::Faucet;
