//! Aptos fullnode REST implementation of [`LedgerClient`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::account::LocalAccount;
use crate::error::{LedgerError, Result};
use crate::types::{
    AccountAddress, AccountResource, ApiErrorBody, CommittedTransaction, Ed25519Signature,
    EntryFunctionPayload, GasEstimation, PendingTransaction, SignedTransaction, SimulationOutcome,
    TransactionStatus, UnsignedTransaction,
};
use crate::LedgerClient;

/// Aptos network the faucet runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Local,
}

impl Network {
    /// Default fullnode REST endpoint (including the `/v1` prefix).
    pub fn node_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1",
            Network::Testnet => "https://fullnode.testnet.aptoslabs.com/v1",
            Network::Devnet => "https://fullnode.devnet.aptoslabs.com/v1",
            Network::Local => "http://127.0.0.1:8080/v1",
        }
    }

    /// Explorer link for a transaction hash.
    pub fn explorer_url(&self, hash: &str) -> String {
        format!(
            "https://explorer.aptoslabs.com/txn/{}?network={}",
            hash, self
        )
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Local => "local",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "local" | "localnet" => Ok(Network::Local),
            other => Err(format!(
                "unknown network '{}', expected mainnet, testnet, devnet or local",
                other
            )),
        }
    }
}

/// Gas, expiration and confirmation-wait settings.
#[derive(Debug, Clone)]
pub struct AptosClientOptions {
    pub max_gas_amount: u64,
    /// Seconds from now until the transaction expires.
    pub expiration_secs: u64,
    /// How long [`LedgerClient::wait_for_transaction`] polls before giving up.
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for AptosClientOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: 20_000,
            expiration_secs: 60,
            confirmation_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// REST client for one fullnode, signing with one [`LocalAccount`].
pub struct AptosLedgerClient {
    http: Client,
    node_url: String,
    account: LocalAccount,
    options: AptosClientOptions,
}

impl AptosLedgerClient {
    pub fn new(node_url: impl Into<String>, account: LocalAccount, options: AptosClientOptions) -> Self {
        let node_url = node_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            node_url,
            account,
            options,
        }
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.node_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    async fn sequence_number(&self, address: &AccountAddress) -> Result<u64> {
        let account: AccountResource = self.get_json(&format!("accounts/{}", address)).await?;
        Ok(account.sequence_number)
    }

    async fn gas_unit_price(&self) -> Result<u64> {
        let estimation: GasEstimation = self.get_json("estimate_gas_price").await?;
        Ok(estimation.gas_estimate)
    }

    /// `GET /transactions/by_hash/{hash}`; `None` while the node has not seen the hash yet (404).
    async fn transaction_status(&self, hash: &str) -> Result<Option<TransactionStatus>> {
        let response = self
            .http
            .get(self.url(&format!("transactions/by_hash/{}", hash)))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }
}

/// Decodes a 2xx JSON body, or turns the fullnode's error body into [`LedgerError::Api`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let (message, error_code) = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => (err.message, err.error_code),
            Err(_) => (body, None),
        };
        return Err(LedgerError::Api {
            status: status.as_u16(),
            message,
            error_code,
        });
    }
    serde_json::from_str(&body).map_err(|e| LedgerError::Decode(format!("{}: {}", e, body)))
}

#[async_trait]
impl LedgerClient for AptosLedgerClient {
    fn sender(&self) -> AccountAddress {
        self.account.address()
    }

    #[instrument(skip(self))]
    async fn build_transfer(&self, recipient: &str, amount: u64) -> Result<UnsignedTransaction> {
        let recipient: AccountAddress = recipient.parse()?;
        let sender = self.account.address();
        let sequence_number = self.sequence_number(&sender).await?;
        let gas_unit_price = self.gas_unit_price().await?;
        let expiration_timestamp_secs =
            chrono::Utc::now().timestamp().max(0) as u64 + self.options.expiration_secs;

        debug!(
            sender = %sender,
            recipient = %recipient,
            sequence_number = sequence_number,
            gas_unit_price = gas_unit_price,
            "step: transfer built"
        );

        Ok(UnsignedTransaction {
            sender,
            sequence_number,
            max_gas_amount: self.options.max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs,
            payload: EntryFunctionPayload::transfer_coins(&recipient, amount),
        })
    }

    #[instrument(skip(self, transaction), fields(sequence_number = transaction.sequence_number))]
    async fn simulate(&self, transaction: &UnsignedTransaction) -> Result<SimulationOutcome> {
        // Simulation rejects valid signatures; the node expects an all-zero one.
        let request = SignedTransaction {
            transaction: transaction.clone(),
            signature: Ed25519Signature::new(&self.account.public_key(), &[0u8; 64]),
        };
        let mut outcomes: Vec<SimulationOutcome> =
            self.post_json("transactions/simulate", &request).await?;
        if outcomes.is_empty() {
            return Err(LedgerError::Decode(
                "simulation returned no transactions".to_string(),
            ));
        }
        let outcome = outcomes.swap_remove(0);
        debug!(
            success = outcome.success,
            vm_status = %outcome.vm_status,
            gas_used = outcome.gas_used,
            "step: transfer simulated"
        );
        Ok(outcome)
    }

    #[instrument(skip(self, transaction), fields(sequence_number = transaction.sequence_number))]
    async fn sign(&self, transaction: &UnsignedTransaction) -> Result<SignedTransaction> {
        let encoded: String = self
            .post_json("transactions/encode_submission", transaction)
            .await?;
        let signing_message = hex::decode(encoded.trim_start_matches("0x"))
            .map_err(|e| LedgerError::Decode(format!("signing message is not hex: {}", e)))?;
        let signature = self.account.sign(&signing_message);
        Ok(SignedTransaction {
            transaction: transaction.clone(),
            signature: Ed25519Signature::new(&self.account.public_key(), &signature),
        })
    }

    #[instrument(skip(self, transaction), fields(sequence_number = transaction.transaction.sequence_number))]
    async fn submit(&self, transaction: &SignedTransaction) -> Result<PendingTransaction> {
        let pending: PendingTransaction = self.post_json("transactions", transaction).await?;
        info!(hash = %pending.hash, "step: transfer submitted");
        Ok(pending)
    }

    #[instrument(skip(self))]
    async fn wait_for_transaction(&self, hash: &str) -> Result<CommittedTransaction> {
        let deadline = Instant::now() + self.options.confirmation_timeout;
        loop {
            match self.transaction_status(hash).await? {
                Some(TransactionStatus::UserTransaction {
                    hash,
                    version,
                    success,
                    vm_status,
                }) => {
                    info!(
                        hash = %hash,
                        version = version,
                        success = success,
                        "step: transfer committed"
                    );
                    return Ok(CommittedTransaction {
                        hash,
                        version,
                        success,
                        vm_status,
                    });
                }
                Some(TransactionStatus::PendingTransaction { hash: pending }) => {
                    debug!(hash = %pending, "Transaction still pending");
                }
                None => debug!(hash = %hash, "Transaction not yet visible"),
            }

            if Instant::now() + self.options.poll_interval > deadline {
                warn!(hash = %hash, "Gave up waiting for confirmation");
                return Err(LedgerError::Timeout {
                    hash: hash.to_string(),
                    timeout_secs: self.options.confirmation_timeout.as_secs(),
                });
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }
    }
}
