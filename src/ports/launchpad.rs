//! Launchpad Adapter Port
//!
//! The polymorphic contract every launchpad variant implements: curve
//! data retrieval, token info retrieval, and buy/sell transaction
//! construction behind one trait, so callers can treat Pump.fun,
//! Bonk.fun and configurable launchpads uniformly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::transaction::Transaction;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::curve::{CurveError, CurveState};
use crate::ports::chain::ChainError;
use crate::safety::validator::ValidationError;

/// Token metadata snapshot, fetched lazily per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Token mint address
    pub mint: String,
    /// Token symbol
    pub symbol: String,
    /// Token name
    pub name: String,
    /// Metadata URI (usually IPFS)
    pub uri: Option<String>,
    /// Creation timestamp, when the chain exposes one
    pub created_at: Option<DateTime<Utc>>,
}

/// Supported launchpad variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchpadKind {
    PumpFun,
    BonkFun,
    Generic,
}

impl LaunchpadKind {
    /// All variants the system knows about.
    pub fn all() -> &'static [LaunchpadKind] {
        &[
            LaunchpadKind::PumpFun,
            LaunchpadKind::BonkFun,
            LaunchpadKind::Generic,
        ]
    }
}

impl fmt::Display for LaunchpadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchpadKind::PumpFun => write!(f, "pump.fun"),
            LaunchpadKind::BonkFun => write!(f, "bonk.fun"),
            LaunchpadKind::Generic => write!(f, "generic"),
        }
    }
}

impl FromStr for LaunchpadKind {
    type Err = LaunchpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pumpfun" | "pump.fun" | "pump_fun" => Ok(LaunchpadKind::PumpFun),
            "bonkfun" | "bonk.fun" | "bonk_fun" => Ok(LaunchpadKind::BonkFun),
            "generic" => Ok(LaunchpadKind::Generic),
            other => Err(LaunchpadError::InvalidInput(format!(
                "unknown launchpad: {}",
                other
            ))),
        }
    }
}

/// Error taxonomy for adapter operations.
///
/// Variants map one-to-one onto what a caller should do next: curve and
/// validation errors are programming or input defects (fatal), chain
/// errors are retryable under the caller's policy, `ProgramNotAllowed`
/// is a deliberate refusal, and `Unimplemented` marks a variant that is
/// structurally present but not yet backed by a program specification.
#[derive(Error, Debug)]
pub enum LaunchpadError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Allowlist gate failure. Fatal; never retried automatically.
    #[error("program {0} not in allowlist")]
    ProgramNotAllowed(String),

    /// The variant exists but its program specification is unavailable.
    #[error("{launchpad} adapter is not ready: {reason}")]
    Unimplemented {
        launchpad: LaunchpadKind,
        reason: String,
    },

    /// Instruction argument encoding failed. Fatal; indicates a defect
    /// in the adapter's encoding routines.
    #[error("instruction encoding failed: {0}")]
    Encoding(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LaunchpadError {
    /// Whether the caller may reasonably retry the operation. All chain
    /// read failures qualify, including a missing account: a curve
    /// account that does not exist yet can appear on a later read.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LaunchpadError::Chain(_))
    }

    /// Whether this failure means "launchpad not supported yet", as
    /// opposed to a transient or input failure.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, LaunchpadError::Unimplemented { .. })
    }
}

/// The launchpad capability set.
///
/// Build operations run the full safety pipeline: allowlist gate first,
/// before any transport call, then structural validation and
/// sanitization after the instruction is encoded. A build aborts entirely
/// on the first failure; a partially-built transaction is never returned.
#[async_trait]
pub trait LaunchpadAdapter: Send + Sync {
    /// Which variant this adapter is.
    fn kind(&self) -> LaunchpadKind;

    /// The on-chain program this adapter targets.
    fn program_id(&self) -> Pubkey;

    /// Check a program id against this adapter's program.
    fn validate_program(&self, program_id: &Pubkey) -> bool {
        *program_id == self.program_id()
    }

    /// Fetch the current bonding-curve snapshot for a token.
    async fn fetch_curve_data(&self, token_mint: &Pubkey) -> Result<CurveState, LaunchpadError>;

    /// Fetch token metadata.
    async fn fetch_token_info(&self, token_mint: &Pubkey) -> Result<TokenInfo, LaunchpadError>;

    /// Build and sign a buy transaction spending `sol_amount` SOL.
    async fn build_buy_transaction(
        &self,
        buyer: &Keypair,
        token_mint: &Pubkey,
        sol_amount: Decimal,
        slippage: Decimal,
    ) -> Result<Transaction, LaunchpadError>;

    /// Build and sign a sell transaction for `token_amount` tokens.
    async fn build_sell_transaction(
        &self,
        seller: &Keypair,
        token_mint: &Pubkey,
        token_amount: Decimal,
        slippage: Decimal,
    ) -> Result<Transaction, LaunchpadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_common_spellings() {
        for s in ["pumpfun", "pump.fun", "PUMP_FUN"] {
            assert_eq!(s.parse::<LaunchpadKind>().unwrap(), LaunchpadKind::PumpFun);
        }
        for s in ["bonkfun", "bonk.fun"] {
            assert_eq!(s.parse::<LaunchpadKind>().unwrap(), LaunchpadKind::BonkFun);
        }
        assert_eq!(
            "generic".parse::<LaunchpadKind>().unwrap(),
            LaunchpadKind::Generic
        );
    }

    #[test]
    fn test_kind_rejects_unknown() {
        let result = "raydium".parse::<LaunchpadKind>();
        assert!(matches!(result, Err(LaunchpadError::InvalidInput(_))));
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in LaunchpadKind::all() {
            let parsed: LaunchpadKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_unimplemented_is_unsupported_not_retryable() {
        let err = LaunchpadError::Unimplemented {
            launchpad: LaunchpadKind::BonkFun,
            reason: "program layout not published".to_string(),
        };
        assert!(err.is_unsupported());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_chain_failures_are_retryable() {
        let err = LaunchpadError::Chain(ChainError::ReadFailed("rpc down".to_string()));
        assert!(err.is_retryable());
        assert!(!err.is_unsupported());

        // A missing account may exist on a later read
        let err = LaunchpadError::Chain(ChainError::AccountNotFound("mint".to_string()));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_not_allowed_is_neither_retryable_nor_unsupported() {
        let err = LaunchpadError::ProgramNotAllowed("someprogram".to_string());
        assert!(!err.is_retryable());
        assert!(!err.is_unsupported());
    }
}
