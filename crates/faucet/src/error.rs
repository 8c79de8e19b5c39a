use std::time::Duration;
use thiserror::Error;

/// Why a faucet request ended without tokens being sent. Every variant is terminal for the request.
#[derive(Error, Debug)]
pub enum FaucetError {
    /// The user received tokens less than one cooldown ago.
    #[error("Rate limited; retry in {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("No recipient address given")]
    MissingAddress,

    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    /// Sequence number, gas price or other ledger state could not be fetched.
    #[error("Failed to build transaction: {0}")]
    BuildFailed(String),

    #[error("Transaction simulation failed: {0}")]
    SimulationFailed(String),

    #[error("Failed to sign transaction: {0}")]
    SigningFailed(String),

    #[error("Transaction submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Transaction {hash} was not confirmed in time")]
    ConfirmationTimeout { hash: String },

    #[error("Could not confirm transaction {hash}: {reason}")]
    ConfirmationFailed { hash: String, reason: String },

    /// Committed but aborted on chain.
    #[error("Transaction {hash} failed on chain: {vm_status}")]
    TransactionFailed { hash: String, vm_status: String },

    #[error("Rate limit store error: {0}")]
    Store(#[from] storage::StorageError),
}
