//! Staged transfer pipeline: build → simulate → sign → submit → confirm.
//!
//! Each stage consumes the previous stage's output, so a stage cannot run unless every earlier
//! stage succeeded. The first failing stage ends the pipeline with its own [`FaucetError`].

use ledger_client::{
    CommittedTransaction, LedgerClient, LedgerError, PendingTransaction, SignedTransaction,
    UnsignedTransaction,
};
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::FaucetError;

/// Pipeline stage, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Build,
    Simulate,
    Sign,
    Submit,
    Confirm,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Build => "build",
            Stage::Simulate => "simulate",
            Stage::Sign => "sign",
            Stage::Submit => "submit",
            Stage::Confirm => "confirm",
        };
        f.write_str(name)
    }
}

/// A confirmed, successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenseReceipt {
    pub recipient: String,
    pub amount: u64,
    pub transaction_hash: String,
    pub version: u64,
}

/// Sends a fixed amount from the faucet account to a recipient.
#[derive(Clone)]
pub struct Dispenser {
    ledger: Arc<dyn LedgerClient>,
    amount: u64,
}

impl Dispenser {
    pub fn new(ledger: Arc<dyn LedgerClient>, amount: u64) -> Self {
        Self { ledger, amount }
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Runs every stage in order. Nothing is retried.
    #[instrument(skip(self), fields(amount = self.amount))]
    pub async fn dispense(&self, recipient: &str) -> Result<DispenseReceipt, FaucetError> {
        let built = self.build(recipient).await?;
        let simulated = self.simulate(built).await?;
        let signed = self.sign(&simulated).await?;
        let pending = self.submit(&signed).await?;
        let committed = self.confirm(&pending).await?;

        info!(
            recipient = recipient,
            hash = %committed.hash,
            version = committed.version,
            "Dispensed"
        );
        Ok(DispenseReceipt {
            recipient: recipient.to_string(),
            amount: self.amount,
            transaction_hash: committed.hash,
            version: committed.version,
        })
    }

    async fn build(&self, recipient: &str) -> Result<UnsignedTransaction, FaucetError> {
        self.ledger
            .build_transfer(recipient, self.amount)
            .await
            .map_err(|e| {
                warn!(stage = %Stage::Build, error = %e, "Stage failed");
                match e {
                    LedgerError::InvalidAddress(addr) => FaucetError::InvalidAddress(addr),
                    other => FaucetError::BuildFailed(other.to_string()),
                }
            })
    }

    /// Passes the transaction through only when the dry run succeeded.
    async fn simulate(
        &self,
        transaction: UnsignedTransaction,
    ) -> Result<UnsignedTransaction, FaucetError> {
        let outcome = self.ledger.simulate(&transaction).await.map_err(|e| {
            warn!(stage = %Stage::Simulate, error = %e, "Stage failed");
            FaucetError::SimulationFailed(e.to_string())
        })?;
        if !outcome.success {
            warn!(stage = %Stage::Simulate, vm_status = %outcome.vm_status, "Simulation rejected");
            return Err(FaucetError::SimulationFailed(outcome.vm_status));
        }
        Ok(transaction)
    }

    async fn sign(&self, transaction: &UnsignedTransaction) -> Result<SignedTransaction, FaucetError> {
        self.ledger.sign(transaction).await.map_err(|e| {
            warn!(stage = %Stage::Sign, error = %e, "Stage failed");
            FaucetError::SigningFailed(e.to_string())
        })
    }

    async fn submit(&self, transaction: &SignedTransaction) -> Result<PendingTransaction, FaucetError> {
        self.ledger.submit(transaction).await.map_err(|e| {
            warn!(stage = %Stage::Submit, error = %e, "Stage failed");
            FaucetError::SubmissionFailed(e.to_string())
        })
    }

    async fn confirm(&self, pending: &PendingTransaction) -> Result<CommittedTransaction, FaucetError> {
        let committed = self
            .ledger
            .wait_for_transaction(&pending.hash)
            .await
            .map_err(|e| {
                warn!(stage = %Stage::Confirm, hash = %pending.hash, error = %e, "Stage failed");
                match e {
                    LedgerError::Timeout { hash, .. } => FaucetError::ConfirmationTimeout { hash },
                    other => FaucetError::ConfirmationFailed {
                        hash: pending.hash.clone(),
                        reason: other.to_string(),
                    },
                }
            })?;
        if !committed.success {
            return Err(FaucetError::TransactionFailed {
                hash: committed.hash,
                vm_status: committed.vm_status,
            });
        }
        Ok(committed)
    }
}
