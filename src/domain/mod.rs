//! Domain Layer - Pure business logic
//!
//! Bonding-curve arithmetic lives here. Nothing in this layer performs
//! I/O; adapters feed it snapshots and consume the quotes it produces.

pub mod curve;

pub use curve::{CurveError, CurveModel, CurveState, Quote, TradeSide};
