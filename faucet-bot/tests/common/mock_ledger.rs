//! Ledger client that succeeds or rejects at simulation, counting calls.

use async_trait::async_trait;
use ledger_client::{
    AccountAddress, CommittedTransaction, Ed25519Signature, EntryFunctionPayload, LedgerClient,
    LedgerError, PendingTransaction, Result, SignedTransaction, SimulationOutcome, UnsignedTransaction,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TX_HASH: &str = "0x5d1f7a0e";
pub const ABORT_STATUS: &str = "Move abort in 0x1::coin: EINSUFFICIENT_BALANCE(0x10006)";

pub struct ScriptedLedger {
    reject_simulation: bool,
    fail_confirmation: bool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedLedger {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            reject_simulation: false,
            fail_confirmation: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn rejecting_simulation() -> Arc<Self> {
        Arc::new(Self {
            reject_simulation: true,
            fail_confirmation: false,
            calls: AtomicUsize::new(0),
        })
    }

    /// Submits fine, then the status lookup returns garbage.
    pub fn failing_confirmation() -> Arc<Self> {
        Arc::new(Self {
            reject_simulation: false,
            fail_confirmation: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    fn sender(&self) -> AccountAddress {
        AccountAddress::new([1u8; 32])
    }

    async fn build_transfer(&self, recipient: &str, amount: u64) -> Result<UnsignedTransaction> {
        self.tick();
        Ok(UnsignedTransaction {
            sender: self.sender(),
            sequence_number: 0,
            max_gas_amount: 20_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_900_000_000,
            payload: EntryFunctionPayload::transfer_coins(&recipient.parse()?, amount),
        })
    }

    async fn simulate(&self, _: &UnsignedTransaction) -> Result<SimulationOutcome> {
        self.tick();
        Ok(SimulationOutcome {
            success: !self.reject_simulation,
            vm_status: if self.reject_simulation {
                ABORT_STATUS.to_string()
            } else {
                "Executed successfully".to_string()
            },
            gas_used: 9,
        })
    }

    async fn sign(&self, txn: &UnsignedTransaction) -> Result<SignedTransaction> {
        self.tick();
        Ok(SignedTransaction {
            transaction: txn.clone(),
            signature: Ed25519Signature::new(&[2u8; 32], &[3u8; 64]),
        })
    }

    async fn submit(&self, _: &SignedTransaction) -> Result<PendingTransaction> {
        self.tick();
        Ok(PendingTransaction {
            hash: TX_HASH.to_string(),
        })
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<CommittedTransaction> {
        self.tick();
        if self.fail_confirmation {
            return Err(LedgerError::Decode("expected a transaction object".to_string()));
        }
        Ok(CommittedTransaction {
            hash: hash.to_string(),
            version: 1,
            success: true,
            vm_status: "Executed successfully".to_string(),
        })
    }
}
