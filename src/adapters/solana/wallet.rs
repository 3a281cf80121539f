//! Wallet Manager
//!
//! Loads signing keypairs from the formats operators actually hand us:
//! JSON byte-array files (solana-keygen), base58 and base64 strings.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("failed to load keypair: {0}")]
    LoadError(String),
    #[error("failed to sign transaction: {0}")]
    SigningError(String),
    #[error("invalid keypair bytes: {0}")]
    InvalidKeypair(String),
}

/// Holder of one signing keypair.
pub struct WalletManager {
    keypair: Keypair,
}

impl WalletManager {
    /// Load from a solana-keygen JSON byte-array file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::LoadError(format!("failed to read file: {}", e)))?;

        let bytes: Vec<u8> = serde_json::from_str(&contents)
            .map_err(|e| WalletError::LoadError(format!("invalid JSON format: {}", e)))?;

        Self::from_bytes(&bytes)
    }

    /// Load from raw 64-byte secret key material.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let keypair =
            Keypair::try_from(bytes).map_err(|e| WalletError::InvalidKeypair(e.to_string()))?;
        Ok(Self { keypair })
    }

    /// Load from a base58-encoded secret key string.
    pub fn from_base58(encoded: &str) -> Result<Self, WalletError> {
        let bytes = bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| WalletError::LoadError(format!("invalid base58: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Load from a base64-encoded secret key string.
    pub fn from_base64(encoded: &str) -> Result<Self, WalletError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| WalletError::LoadError(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Fresh random keypair, for tests and dry runs.
    pub fn new_random() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// Sign a transaction against its existing recent blockhash.
    pub fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), WalletError> {
        transaction
            .try_sign(&[&self.keypair], transaction.message.recent_blockhash)
            .map_err(|e| WalletError::SigningError(e.to_string()))
    }
}
