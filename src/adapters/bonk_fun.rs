//! Bonk.fun Launchpad Adapter
//!
//! Structurally complete but not chain-backed: the Bonk.fun program's
//! instruction layout and curve account format are not wired in yet.
//! Every chain-touching operation fails fast with
//! [`LaunchpadError::Unimplemented`] so callers can distinguish "not
//! supported yet" from transient failures, and never receive placeholder
//! data that looks like a real curve.

use async_trait::async_trait;
use rust_decimal::Decimal;
use solana_sdk::{pubkey, pubkey::Pubkey};
use solana_sdk::signature::Keypair;
use solana_sdk::transaction::Transaction;
use tracing::warn;

use crate::domain::curve::CurveState;
use crate::ports::launchpad::{LaunchpadAdapter, LaunchpadError, LaunchpadKind, TokenInfo};

/// LetsBonk.fun launch platform (Raydium LaunchLab program, mainnet)
pub const BONK_FUN_PROGRAM_ID: Pubkey = pubkey!("LanMV9sAd7wArD4vJFi2qDdfnVhFxYSUg6eADduJ3uj");

/// Placeholder adapter for the Bonk.fun launchpad.
#[derive(Debug, Clone)]
pub struct BonkFunAdapter {
    program_id: Pubkey,
}

impl Default for BonkFunAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl BonkFunAdapter {
    pub fn new() -> Self {
        Self {
            program_id: BONK_FUN_PROGRAM_ID,
        }
    }

    fn unimplemented(&self, operation: &str) -> LaunchpadError {
        warn!(operation, "bonk.fun adapter called before program support landed");
        LaunchpadError::Unimplemented {
            launchpad: LaunchpadKind::BonkFun,
            reason: format!("{} requires the LaunchLab instruction layout", operation),
        }
    }
}

#[async_trait]
impl LaunchpadAdapter for BonkFunAdapter {
    fn kind(&self) -> LaunchpadKind {
        LaunchpadKind::BonkFun
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
    fn test_kind_and_program_id() {
        let adapter = BonkFunAdapter::new();
        assert_eq!(adapter.kind(), LaunchpadKind::BonkFun);
        assert_eq!(adapter.program_id(), BONK_FUN_PROGRAM_ID);
        assert!(adapter.validate_program(&BONK_FUN_PROGRAM_ID));
        assert!(!adapter.validate_program(&Pubkey::new_unique()));
    }

    #[tokio::test]
    async fn test_all_chain_operations_report_unsupported() {
        let adapter = BonkFunAdapter::new();
        let mint = Pubkey::new_unique();
        let keypair = Keypair::new();

        let err = adapter.fetch_curve_data(&mint).await.unwrap_err();
        assert!(err.is_unsupported());

        let err = adapter.fetch_token_info(&mint).await.unwrap_err();
        assert!(err.is_unsupported());

        let err = adapter
            .build_buy_transaction(&keypair, &mint, dec!(0.5), dec!(0.05))
            .await
            .unwrap_err();
        assert!(err.is_unsupported());
        assert!(!err.is_retryable());

        let err = adapter
            .build_sell_transaction(&keypair, &mint, dec!(1000), dec!(0.05))
            .await
            .unwrap_err();
        assert!(err.is_unsupported());
    }
}
