//! Solana RPC Chain Reader
//!
//! Blocking `RpcClient` wrapped for async callers via `spawn_blocking`,
//! with a per-request timeout. Implements the [`ChainReader`] port; all
//! failures map onto [`ChainError`] so the core never sees RPC types.

use async_trait::async_trait;
use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::ports::chain::{ChainError, ChainReader};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// RPC-backed chain reader.
#[derive(Clone)]
pub struct SolanaClient {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
    request_timeout: Duration,
}

impl SolanaClient {
    /// Connect at confirmed commitment with the default timeout.
    pub fn new(rpc_url: String) -> Self {
        Self::with_commitment(rpc_url, CommitmentConfig::confirmed(), DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_commitment(
        rpc_url: String,
        commitment: CommitmentConfig,
        request_timeout: Duration,
    ) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, commitment));
        Self {
            client,
            commitment,
            request_timeout,
        }
    }

    /// Run a blocking RPC call on the blocking pool under the timeout.
    async fn run_blocking<T, F>(&self, call: F) -> Result<T, ChainError>
    where
        T: Send + 'static,
        F: FnOnce(Arc<RpcClient>) -> Result<T, ChainError> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let handle = tokio::task::spawn_blocking(move || call(client));

        match tokio::time::timeout(self.request_timeout, handle).await {
            Ok(joined) => {
                joined.map_err(|e| ChainError::ReadFailed(format!("task join error: {}", e)))?
            }
            Err(_) => Err(ChainError::Timeout(self.request_timeout)),
        }
    }

}

#[async_trait]
impl ChainReader for SolanaClient {
    async fn read_account(&self, address: &Pubkey) -> Result<Vec<u8>, ChainError> {
        let address = *address;
        let commitment = self.commitment;
        debug!(account = %address, "reading account over rpc");

        self.run_blocking(move |client| {
            let response = client
                .get_account_with_commitment(&address, commitment)
                .map_err(|e| ChainError::ReadFailed(e.to_string()))?;
            match response.value {
                Some(account) => Ok(account.data),
                None => Err(ChainError::AccountNotFound(address.to_string())),
            }
        })
        .await
    }

    async fn latest_blockhash(&self) -> Result<Hash, ChainError> {
        self.run_blocking(move |client| {
            client
                .get_latest_blockhash()
                .map_err(|e| ChainError::ReadFailed(e.to_string()))
        })
        .await
    }
}
