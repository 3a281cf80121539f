//! Call-recording test doubles for the port traits.
//!
//! Hand-rolled rather than generated: the safety-pipeline tests assert on
//! call counts and ordering (e.g. "no transport call happened before the
//! allowlist gate fired"), which is simplest with a plain recorder.

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::chain::{ChainError, ChainReader};

/// Mock chain reader serving canned account bytes and a fixed blockhash,
/// recording every call it receives.
#[derive(Debug, Default)]
pub struct MockChainReader {
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    blockhash: Mutex<Hash>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to serve `data` for reads of `address`.
    pub fn with_account(self, address: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.lock().unwrap().insert(address, data);
        self
    }

    /// Builder method to fix the blockhash returned to transaction builds.
    pub fn with_blockhash(self, blockhash: Hash) -> Self {
        *self.blockhash.lock().unwrap() = blockhash;
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Total number of transport calls issued against this reader.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn read_account(&self, address: &Pubkey) -> Result<Vec<u8>, ChainError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("read_account:{}", address));
        self.accounts
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| ChainError::AccountNotFound(address.to_string()))
    }

    async fn latest_blockhash(&self) -> Result<Hash, ChainError> {
        self.calls
            .lock()
            .unwrap()
            .push("latest_blockhash".to_string());
        Ok(*self.blockhash.lock().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_configured_account() {
        let address = Pubkey::new_unique();
        let mock = MockChainReader::new().with_account(address, vec![1, 2, 3]);

        let data = mock.read_account(&address).await.unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(mock.calls(), vec![format!("read_account:{}", address)]);
    }

    #[tokio::test]
    async fn test_mock_reports_missing_account() {
        let mock = MockChainReader::new();
        let result = mock.read_account(&Pubkey::new_unique()).await;
        assert!(matches!(result, Err(ChainError::AccountNotFound(_))));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_blockhash_calls() {
        let mock = MockChainReader::new();
        let _ = mock.latest_blockhash().await.unwrap();
        assert_eq!(mock.calls(), vec!["latest_blockhash".to_string()]);
    }
}
