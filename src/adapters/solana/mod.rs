//! Solana transport adapters: RPC chain reads and wallet key handling.

pub mod rpc;
pub mod wallet;
