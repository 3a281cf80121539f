//! Adapters Layer - Concrete implementations of the port traits
//!
//! One module per launchpad variant plus the Solana transport pieces
//! (RPC reader, wallet). Everything here stays behind the traits in
//! `crate::ports`; the domain and safety layers never import from this
//! module.

pub mod bonk_fun;
pub mod generic;
pub mod pump_fun;
pub mod solana;

pub use bonk_fun::{BonkFunAdapter, BONK_FUN_PROGRAM_ID};
pub use generic::{GenericAdapter, LaunchpadParams};
pub use pump_fun::PumpFunAdapter;
pub use solana::rpc::SolanaClient;
pub use solana::wallet::{WalletError, WalletManager};
