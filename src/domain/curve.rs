//! Bonding Curve Model
//!
//! Pure constant-product quoting over a launchpad bonding curve's virtual
//! reserves. No I/O, no floats in the money path: all arithmetic is
//! `rust_decimal` so the same inputs always produce the same quote.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places quotes are carried at (lamport resolution).
const QUOTE_SCALE: u32 = 9;

/// Basis points in 100%.
const BPS_DENOMINATOR: Decimal = dec!(10000);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Bad caller-supplied numeric input (amount, slippage, reserves).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The curve degenerates: the requested trade rounds to zero output.
    #[error("insufficient liquidity: trade of {input} produces no output")]
    InsufficientLiquidity { input: Decimal },
}

/// Trade direction for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Immutable snapshot of a bonding curve at a point in time.
///
/// Created per query and owned by the caller; never mutated. Prices are
/// SOL-denominated, token amounts are in whole-token units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveState {
    /// Token mint address (string-canonicalized)
    pub mint: String,
    /// Spot price in SOL per token
    pub current_price: Decimal,
    /// Marginal price change per token traded out of the curve
    pub slope: Decimal,
    /// SOL actually held by the curve
    pub liquidity: Decimal,
    /// Total token supply
    pub total_supply: Decimal,
    /// Spot price times total supply, in SOL
    pub market_cap: Decimal,
    /// Virtual SOL reserves backing the curve
    pub virtual_sol_reserves: Decimal,
    /// Virtual token reserves backing the curve
    pub virtual_token_reserves: Decimal,
    /// When this snapshot was taken
    pub observed_at: DateTime<Utc>,
}

impl CurveState {
    /// Build a snapshot from raw reserve figures, deriving the price,
    /// market cap and slope from the constant-product relation.
    pub fn from_reserves(
        mint: impl Into<String>,
        virtual_sol_reserves: Decimal,
        virtual_token_reserves: Decimal,
        real_sol_reserves: Decimal,
        total_supply: Decimal,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, CurveError> {
        if virtual_sol_reserves <= Decimal::ZERO || virtual_token_reserves <= Decimal::ZERO {
            return Err(CurveError::InvalidInput(format!(
                "reserves must be positive, got sol={} tokens={}",
                virtual_sol_reserves, virtual_token_reserves
            )));
        }

        let current_price = virtual_sol_reserves / virtual_token_reserves;
        // For x*y=k the magnitude of dp/dT is 2p/T
        let slope = dec!(2) * current_price / virtual_token_reserves;

        Ok(Self {
            mint: mint.into(),
            current_price,
            slope,
            liquidity: real_sol_reserves,
            total_supply,
            market_cap: current_price * total_supply,
            virtual_sol_reserves,
            virtual_token_reserves,
            observed_at,
        })
    }

    /// Spot price implied by the virtual reserves (SOL per token)
    pub fn spot_price(&self) -> Decimal {
        if self.virtual_token_reserves.is_zero() {
            return Decimal::ZERO;
        }
        self.virtual_sol_reserves / self.virtual_token_reserves
    }
}

/// Deterministic trade quote derived from a [`CurveState`].
///
/// Invariants: `min_output = output_amount * (1 - slippage_tolerance)` and,
/// for buys, `max_input = input_amount * (1 + slippage_tolerance)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Trade direction
    pub side: TradeSide,
    /// Amount spent (SOL for buys, tokens for sells)
    pub input_amount: Decimal,
    /// Amount received (tokens for buys, SOL for sells)
    pub output_amount: Decimal,
    /// Price impact of this trade, in percent
    pub price_impact_pct: Decimal,
    /// Slippage tolerance the quote was computed with, in [0, 1]
    pub slippage_tolerance: Decimal,
    /// Launchpad fee taken out of the trade
    pub fee_amount: Decimal,
    /// Worst acceptable output under the slippage tolerance
    pub min_output: Decimal,
    /// Worst acceptable input under the slippage tolerance
    pub max_input: Decimal,
}

/// Pure bonding-curve arithmetic with a configurable launchpad fee.
#[derive(Debug, Clone, Copy)]
pub struct CurveModel {
    fee_bps: u32,
}

impl Default for CurveModel {
    /// Fee-free model for pure math use; adapters configure the real fee.
    fn default() -> Self {
        Self { fee_bps: 0 }
    }
}

impl CurveModel {
    /// Create a model charging `fee_bps` basis points per trade.
    pub fn new(fee_bps: u32) -> Result<Self, CurveError> {
        if fee_bps >= 10_000 {
            return Err(CurveError::InvalidInput(format!(
                "fee_bps must be below 10000, got {}",
                fee_bps
            )));
        }
        Ok(Self { fee_bps })
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    /// Quote buying tokens with `sol_amount` SOL.
    ///
    /// Constant-product: `out = T * net / (S + net)` where `net` is the
    /// SOL amount after the launchpad fee.
    pub fn quote_buy(
        &self,
        curve: &CurveState,
        sol_amount: Decimal,
        slippage: Decimal,
    ) -> Result<Quote, CurveError> {
        check_amount("sol_amount", sol_amount)?;
        check_slippage(slippage)?;
        check_reserves(curve)?;

        let fee = self.fee_of(sol_amount);
        let net = sol_amount - fee;
        let sol = curve.virtual_sol_reserves;
        let tokens = curve.virtual_token_reserves;

        let output = floor_quote(tokens * net / (sol + net));
        if output.is_zero() {
            return Err(CurveError::InsufficientLiquidity { input: sol_amount });
        }

        // Impact relative to the zero-depth spot fill: 1 - S/(S+net)
        let price_impact_pct = (net / (sol + net) * dec!(100)).round_dp(6);

        Ok(Quote {
            side: TradeSide::Buy,
            input_amount: sol_amount,
            output_amount: output,
            price_impact_pct,
            slippage_tolerance: slippage,
            fee_amount: fee,
            min_output: floor_quote(output * (Decimal::ONE - slippage)),
            max_input: ceil_quote(sol_amount * (Decimal::ONE + slippage)),
        })
    }

    /// Quote selling `token_amount` tokens back into the curve for SOL.
    pub fn quote_sell(
        &self,
        curve: &CurveState,
        token_amount: Decimal,
        slippage: Decimal,
    ) -> Result<Quote, CurveError> {
        check_amount("token_amount", token_amount)?;
        check_slippage(slippage)?;
        check_reserves(curve)?;

        let sol = curve.virtual_sol_reserves;
        let tokens = curve.virtual_token_reserves;

        let gross = sol * token_amount / (tokens + token_amount);
        let fee = self.fee_of(gross);
        let output = floor_quote(gross - fee);
        if output.is_zero() {
            return Err(CurveError::InsufficientLiquidity {
                input: token_amount,
            });
        }

        let price_impact_pct = (token_amount / (tokens + token_amount) * dec!(100)).round_dp(6);

        Ok(Quote {
            side: TradeSide::Sell,
            input_amount: token_amount,
            output_amount: output,
            price_impact_pct,
            slippage_tolerance: slippage,
            fee_amount: fee,
            min_output: floor_quote(output * (Decimal::ONE - slippage)),
            // Slippage protects the output side of a sell
            max_input: token_amount,
        })
    }

    fn fee_of(&self, amount: Decimal) -> Decimal {
        amount * Decimal::from(self.fee_bps) / BPS_DENOMINATOR
    }
}

fn check_amount(name: &str, amount: Decimal) -> Result<(), CurveError> {
    if amount <= Decimal::ZERO {
        return Err(CurveError::InvalidInput(format!(
            "{} must be positive, got {}",
            name, amount
        )));
    }
    Ok(())
}

fn check_slippage(slippage: Decimal) -> Result<(), CurveError> {
    if slippage < Decimal::ZERO || slippage > Decimal::ONE {
        return Err(CurveError::InvalidInput(format!(
            "slippage must be within [0, 1], got {}",
            slippage
        )));
    }
    Ok(())
}

fn check_reserves(curve: &CurveState) -> Result<(), CurveError> {
    if curve.virtual_sol_reserves <= Decimal::ZERO || curve.virtual_token_reserves <= Decimal::ZERO
    {
        return Err(CurveError::InvalidInput(format!(
            "curve reserves must be positive, got sol={} tokens={}",
            curve.virtual_sol_reserves, curve.virtual_token_reserves
        )));
    }
    Ok(())
}

fn floor_quote(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUOTE_SCALE, RoundingStrategy::ToZero)
}

fn ceil_quote(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUOTE_SCALE, RoundingStrategy::AwayFromZero)
}
