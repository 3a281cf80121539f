//! Generic Launchpad Adapter
//!
//! Config-driven variant for launchpads without first-class support. The
//! program id and curve parameters arrive from configuration instead of
//! being compiled in, so operators can point the adapter at a new
//! bonding-curve program. Until a parameter mapping describes that
//! program's account layouts and instruction encoding, every chain
//! operation fails with [`LaunchpadError::Unimplemented`].

use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::transaction::Transaction;
use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::curve::CurveState;
use crate::ports::launchpad::{LaunchpadAdapter, LaunchpadError, LaunchpadKind, TokenInfo};

/// Free-form launchpad parameters from configuration.
///
/// Keys and values are opaque strings; a future parameter mapping layer
/// interprets them (seeds, discriminators, account layouts). The adapter
/// itself only stores and exposes them.
pub type LaunchpadParams = HashMap<String, String>;

/// Adapter for an operator-configured launchpad program.
#[derive(Debug, Clone)]
pub struct GenericAdapter {
    program_id: Pubkey,
    params: LaunchpadParams,
}

impl GenericAdapter {
    pub fn new(program_id: Pubkey, params: LaunchpadParams) -> Self {
        Self { program_id, params }
    }

    /// Build from a string program id, as configuration supplies it.
    pub fn from_config(program_id: &str, params: LaunchpadParams) -> Result<Self, LaunchpadError> {
        let program_id = Pubkey::from_str(program_id).map_err(|e| {
            LaunchpadError::InvalidInput(format!("invalid program id {}: {}", program_id, e))
        })?;
        Ok(Self::new(program_id, params))
    }

    /// Configured parameter lookup.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    fn unimplemented(&self, operation: &str) -> LaunchpadError {
        warn!(
            operation,
            program = %self.program_id,
            "generic adapter called without a parameter mapping"
        );
        LaunchpadError::Unimplemented {
            launchpad: LaunchpadKind::Generic,
            reason: format!("{} requires a launchpad parameter mapping", operation),
        }
    }
}

#[async_trait]
impl LaunchpadAdapter for GenericAdapter {
    fn kind(&self) -> LaunchpadKind {
        LaunchpadKind::Generic
    }

    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    async fn fetch_curve_data(&self, _token_mint: &Pubkey) -> Result<CurveState, LaunchpadError> {
        Err(self.unimplemented("fetch_curve_data"))
    }

    async fn fetch_token_info(&self, _token_mint: &Pubkey) -> Result<TokenInfo, LaunchpadError> {
        Err(self.unimplemented("fetch_token_info"))
    }

    async fn build_buy_transaction(
        &self,
        _buyer: &Keypair,
        _token_mint: &Pubkey,
        _sol_amount: Decimal,
        _slippage: Decimal,
    ) -> Result<Transaction, LaunchpadError> {
        Err(self.unimplemented("build_buy_transaction"))
    }

    async fn build_sell_transaction(
        &self,
        _seller: &Keypair,
        _token_mint: &Pubkey,
        _token_amount: Decimal,
        _slippage: Decimal,
    ) -> Result<Transaction, LaunchpadError> {
        Err(self.unimplemented("build_sell_transaction"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_program_id_comes_from_config() {
        let program = Pubkey::new_unique();
        let adapter = GenericAdapter::new(program, LaunchpadParams::new());

        assert_eq!(adapter.kind(), LaunchpadKind::Generic);
        assert_eq!(adapter.program_id(), program);
        assert!(adapter.validate_program(&program));
    }

    #[test]
    fn test_from_config_rejects_bad_program_id() {
        let result = GenericAdapter::from_config("not-a-pubkey", LaunchpadParams::new());
        assert!(matches!(result, Err(LaunchpadError::InvalidInput(_))));
    }

    #[test]
    fn test_params_are_exposed() {
        let mut params = LaunchpadParams::new();
        params.insert("curve_seed".to_string(), "bonding-curve".to_string());
        let adapter = GenericAdapter::new(Pubkey::new_unique(), params);

        assert_eq!(adapter.param("curve_seed"), Some("bonding-curve"));
        assert_eq!(adapter.param("missing"), None);
    }

    #[tokio::test]
    async fn test_operations_unsupported_without_mapping() {
        let adapter = GenericAdapter::new(Pubkey::new_unique(), LaunchpadParams::new());
        let mint = Pubkey::new_unique();

        let err = adapter.fetch_curve_data(&mint).await.unwrap_err();
        assert!(err.is_unsupported());

        let err = adapter
            .build_buy_transaction(&Keypair::new(), &mint, dec!(1), dec!(0.05))
            .await
            .unwrap_err();
        assert!(err.is_unsupported());
    }
}
