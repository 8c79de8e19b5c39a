//! The faucet's source account: an Ed25519 key pair and the address derived from it.

use ed25519_dalek::{Signer, SigningKey};
use sha3::{Digest, Sha3_256};

use crate::error::{LedgerError, Result};
use crate::types::AccountAddress;

/// Authentication-key scheme byte for single-signer Ed25519 accounts.
const ED25519_SCHEME: u8 = 0x00;
/// AIP-80 prefix some wallets export private keys with.
const AIP80_PREFIX: &str = "ed25519-priv-";

/// Source account that signs faucet transfers.
pub struct LocalAccount {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl LocalAccount {
    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = derive_address(&signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            address,
        }
    }

    /// Parses a hex private key (optionally `0x`- or `ed25519-priv-`-prefixed) of exactly 32 bytes.
    pub fn from_private_key_hex(key: &str) -> Result<Self> {
        let key = key.trim();
        let key = key.strip_prefix(AIP80_PREFIX).unwrap_or(key);
        let digits = key.strip_prefix("0x").unwrap_or(key);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
            LedgerError::InvalidPrivateKey(format!("expected 32 hex-encoded bytes: {}", e))
        })?;
        Ok(Self::from_signing_key(SigningKey::from_bytes(&bytes)))
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Address = SHA3-256(public_key || scheme byte).
pub fn derive_address(public_key: &[u8; 32]) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key);
    hasher.update([ED25519_SCHEME]);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    AccountAddress::new(bytes)
}
