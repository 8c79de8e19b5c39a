use thiserror::Error;

/// Errors from building, simulating, signing, submitting or awaiting a transaction.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid account address: {0}")]
    InvalidAddress(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the fullnode, with the message from its error body.
    #[error("Fullnode returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        error_code: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Transaction {hash} not confirmed within {timeout_secs}s")]
    Timeout { hash: String, timeout_secs: u64 },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
