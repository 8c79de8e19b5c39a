//! # Ledger client abstraction
//!
//! Defines the [`LedgerClient`] trait (one method per transfer stage) and an Aptos fullnode REST
//! implementation, [`AptosLedgerClient`]. The faucet drives the stages in order; tests substitute a
//! scripted client so no network is needed.

use async_trait::async_trait;

mod account;
mod aptos;
mod error;
mod types;

pub use account::{derive_address, LocalAccount};
pub use aptos::{AptosClientOptions, AptosLedgerClient, Network};
pub use error::{LedgerError, Result};
pub use types::{
    AccountAddress, CommittedTransaction, Ed25519Signature, EntryFunctionPayload,
    PendingTransaction, SignedTransaction, SimulationOutcome, UnsignedTransaction, APTOS_COIN,
    TRANSFER_FUNCTION, VM_STATUS_SUCCESS,
};

/// Transfer stages against a ledger. Each call is one network round trip (signing may need one to
/// obtain the signing message); none retries.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Address funds are sent from.
    fn sender(&self) -> AccountAddress;

    /// Builds a coin transfer of `amount` base units from [`LedgerClient::sender`] to `recipient`.
    /// Fails with [`LedgerError::InvalidAddress`] when `recipient` is not an account address.
    async fn build_transfer(&self, recipient: &str, amount: u64) -> Result<UnsignedTransaction>;

    /// Dry-runs the transaction against current ledger state.
    async fn simulate(&self, transaction: &UnsignedTransaction) -> Result<SimulationOutcome>;

    /// Signs the transaction with the sender's key.
    async fn sign(&self, transaction: &UnsignedTransaction) -> Result<SignedTransaction>;

    /// Submits a signed transaction; returns its hash.
    async fn submit(&self, transaction: &SignedTransaction) -> Result<PendingTransaction>;

    /// Blocks until the transaction is committed or the client's wait limit elapses.
    async fn wait_for_transaction(&self, hash: &str) -> Result<CommittedTransaction>;
}
