//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - On-chain reads (account data, blockhash anchoring)
//! - The launchpad adapter contract itself
//!
//! Adapters under `crate::adapters` implement them; tests swap in the
//! doubles from `mocks`.

pub mod chain;
pub mod launchpad;
pub mod mocks;

pub use chain::{ChainError, ChainReader};
pub use launchpad::{LaunchpadAdapter, LaunchpadError, LaunchpadKind, TokenInfo};
