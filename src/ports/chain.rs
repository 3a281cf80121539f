//! Chain Reader Port
//!
//! Trait seam for the on-chain read transport. The core never embeds
//! retry or backoff logic; a read either succeeds, reports a missing
//! account, or fails with a retryable transport error the caller can
//! handle under its own policy.

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ChainError {
    /// Transport-level read failure. Retryable by the caller.
    #[error("chain read failed: {0}")]
    ReadFailed(String),

    /// The requested account does not exist at the queried commitment.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The read did not complete within the configured timeout.
    #[error("chain read timed out after {0:?}")]
    Timeout(Duration),
}

/// Abstract on-chain read access.
///
/// Implementations must be safe to call concurrently; the adapters issue
/// reads from multiple in-flight build requests against one instance.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetch the raw data of an account, failing with
    /// [`ChainError::AccountNotFound`] when it does not exist.
    async fn read_account(&self, address: &Pubkey) -> Result<Vec<u8>, ChainError>;

    /// Fetch the latest blockhash to anchor a transaction to.
    async fn latest_blockhash(&self) -> Result<Hash, ChainError>;
}
