//! Launchpad Kit - Memecoin Launchpad Adapter Library
//!
//! Quote and transaction building for Solana memecoin launchpads behind
//! one polymorphic adapter contract, with every build gated by an
//! allowlist / validate / sanitize safety pipeline.
//!
//! # Modules
//!
//! - `domain`: Pure bonding-curve math (CurveModel, CurveState, Quote)
//! - `safety`: Allowlist gate, instruction validator, behavior sanitizer
//! - `ports`: Trait abstractions (ChainReader, LaunchpadAdapter)
//! - `adapters`: Launchpad variants (Pump.fun, Bonk.fun, Generic) and
//!   Solana transport (RPC, wallet)
//! - `config`: Configuration loading and logging bootstrap

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod safety;

pub use domain::{CurveError, CurveModel, CurveState, Quote, TradeSide};
pub use ports::{ChainReader, LaunchpadAdapter, LaunchpadError, LaunchpadKind, TokenInfo};
pub use safety::{AllowlistManager, BehaviorSanitizer, InstructionValidator, SanitizePolicy};
