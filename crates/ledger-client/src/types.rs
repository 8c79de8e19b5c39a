//! Wire types for the Aptos fullnode REST API and the stage outcomes of a transfer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Coin type dispensed by the faucet.
pub const APTOS_COIN: &str = "0x1::aptos_coin::AptosCoin";
/// Entry function used for transfers; creates the recipient account if it does not exist.
pub const TRANSFER_FUNCTION: &str = "0x1::aptos_account::transfer_coins";
/// VM status reported for a successful (simulated or committed) transaction.
pub const VM_STATUS_SUCCESS: &str = "Executed successfully";

/// 32-byte account address. Parsed from hex with or without `0x`, short forms are left-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    pub const LENGTH: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for AccountAddress {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(LedgerError::InvalidAddress(s.to_string()));
        }
        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|_| LedgerError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// The fullnode encodes u64 values as decimal strings.
mod u64_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// `entry_function_payload` for a single entry-function call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub payload_type: &'static str,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}

impl EntryFunctionPayload {
    /// `transfer_coins<AptosCoin>(recipient, amount)`.
    pub fn transfer_coins(recipient: &AccountAddress, amount: u64) -> Self {
        Self {
            payload_type: "entry_function_payload",
            function: TRANSFER_FUNCTION.to_string(),
            type_arguments: vec![APTOS_COIN.to_string()],
            arguments: vec![
                serde_json::Value::String(recipient.to_string()),
                serde_json::Value::String(amount.to_string()),
            ],
        }
    }
}

/// A transaction ready to be simulated or signed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsignedTransaction {
    pub sender: AccountAddress,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    #[serde(with = "u64_string")]
    pub max_gas_amount: u64,
    #[serde(with = "u64_string")]
    pub gas_unit_price: u64,
    #[serde(with = "u64_string")]
    pub expiration_timestamp_secs: u64,
    pub payload: EntryFunctionPayload,
}

/// Ed25519 authenticator as the REST API expects it (hex strings with `0x`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ed25519Signature {
    #[serde(rename = "type")]
    pub signature_type: &'static str,
    pub public_key: String,
    pub signature: String,
}

impl Ed25519Signature {
    pub fn new(public_key: &[u8; 32], signature: &[u8; 64]) -> Self {
        Self {
            signature_type: "ed25519_signature",
            public_key: format!("0x{}", hex::encode(public_key)),
            signature: format!("0x{}", hex::encode(signature)),
        }
    }
}

/// Unsigned transaction plus its authenticator; the body of submit and simulate requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub transaction: UnsignedTransaction,
    pub signature: Ed25519Signature,
}

/// Result of a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationOutcome {
    pub success: bool,
    pub vm_status: String,
    #[serde(with = "u64_string")]
    pub gas_used: u64,
}

/// Hash returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
}

/// A transaction the ledger has committed (successfully or not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTransaction {
    pub hash: String,
    pub version: u64,
    pub success: bool,
    pub vm_status: String,
}

/// `GET /accounts/{address}` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountResource {
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
}

/// `GET /estimate_gas_price` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GasEstimation {
    pub gas_estimate: u64,
}

/// `GET /transactions/by_hash/{hash}` response, reduced to the fields the faucet reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum TransactionStatus {
    PendingTransaction {
        hash: String,
    },
    UserTransaction {
        hash: String,
        #[serde(with = "u64_string")]
        version: u64,
        success: bool,
        vm_status: String,
    },
}

/// Error body returned by the fullnode on non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
    pub error_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_short_form_is_left_padded() {
        let addr: AccountAddress = "0x1".parse().unwrap();
        assert_eq!(
            addr.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
        let no_prefix: AccountAddress = "1".parse().unwrap();
        assert_eq!(addr, no_prefix);
    }

    #[test]
    fn test_address_rejects_garbage() {
        assert!("".parse::<AccountAddress>().is_err());
        assert!("0x".parse::<AccountAddress>().is_err());
        assert!("0xzz".parse::<AccountAddress>().is_err());
        assert!(format!("0x{}", "a".repeat(65)).parse::<AccountAddress>().is_err());
    }

    #[test]
    fn test_transfer_payload_json() {
        let recipient: AccountAddress = "0x2".parse().unwrap();
        let payload = EntryFunctionPayload::transfer_coins(&recipient, 10_000_000);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "entry_function_payload");
        assert_eq!(json["function"], TRANSFER_FUNCTION);
        assert_eq!(json["type_arguments"][0], APTOS_COIN);
        assert_eq!(json["arguments"][1], "10000000");
    }

    #[test]
    fn test_signed_transaction_flattens_fields() {
        let sender: AccountAddress = "0x3".parse().unwrap();
        let txn = UnsignedTransaction {
            sender,
            sequence_number: 5,
            max_gas_amount: 20_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_700_000_000,
            payload: EntryFunctionPayload::transfer_coins(&sender, 1),
        };
        let signed = SignedTransaction {
            transaction: txn,
            signature: Ed25519Signature::new(&[0u8; 32], &[0u8; 64]),
        };
        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["sequence_number"], "5");
        assert_eq!(json["gas_unit_price"], "100");
        assert_eq!(json["signature"]["type"], "ed25519_signature");
    }

    #[test]
    fn test_transaction_status_variants() {
        let pending: TransactionStatus =
            serde_json::from_str(r#"{"type":"pending_transaction","hash":"0xab"}"#).unwrap();
        assert!(matches!(pending, TransactionStatus::PendingTransaction { .. }));

        let committed: TransactionStatus = serde_json::from_str(
            r#"{"type":"user_transaction","hash":"0xab","version":"99","success":true,"vm_status":"Executed successfully","gas_used":"7"}"#,
        )
        .unwrap();
        match committed {
            TransactionStatus::UserTransaction { version, success, .. } => {
                assert_eq!(version, 99);
                assert!(success);
            }
            _ => panic!("expected user_transaction"),
        }
    }
}
