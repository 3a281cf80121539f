//! Pump.fun On-Chain State Decoding
//!
//! Borsh layouts for the bonding-curve account and the Metaplex metadata
//! account, plus the unit conversions between on-chain integer amounts
//! (lamports, raw token units) and the decimal amounts the curve model
//! works in.

use borsh::{BorshDeserialize, BorshSerialize};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use solana_sdk::pubkey::Pubkey;

use crate::domain::curve::{CurveError, CurveState};
use crate::ports::launchpad::{LaunchpadError, TokenInfo};

/// Anchor account discriminator for `BondingCurve`
pub const BONDING_CURVE_DISCRIMINATOR: [u8; 8] = [23, 183, 248, 55, 96, 216, 172, 96];

/// Pump.fun tokens are minted with 6 decimals
pub const TOKEN_DECIMALS: u32 = 6;

const LAMPORTS_PER_SOL_DEC: Decimal = dec!(1000000000);
const RAW_PER_TOKEN: Decimal = dec!(1000000);

/// Bonding-curve account body, after the 8-byte discriminator.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct BondingCurveAccount {
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub token_total_supply: u64,
    /// Set once the curve completes and the pool migrates
    pub complete: bool,
    pub creator: Pubkey,
}

impl BondingCurveAccount {
    /// Decode a bonding-curve account from raw account data, checking the
    /// discriminator first. Trailing bytes after the known fields are
    /// tolerated; the program has appended fields before.
    pub fn decode(data: &[u8]) -> Result<Self, LaunchpadError> {
        if data.len() < 8 {
            return Err(LaunchpadError::Encoding(format!(
                "bonding curve account too short: {} bytes",
                data.len()
            )));
        }
        if data[..8] != BONDING_CURVE_DISCRIMINATOR {
            return Err(LaunchpadError::Encoding(
                "account discriminator does not match BondingCurve".to_string(),
            ));
        }
        BondingCurveAccount::deserialize(&mut &data[8..])
            .map_err(|e| LaunchpadError::Encoding(format!("bonding curve deserialize: {}", e)))
    }

    /// Convert on-chain integer reserves into a decimal curve snapshot.
    pub fn to_curve_state(
        &self,
        mint: &Pubkey,
        observed_at: DateTime<Utc>,
    ) -> Result<CurveState, CurveError> {
        CurveState::from_reserves(
            mint.to_string(),
            lamports_to_sol(self.virtual_sol_reserves),
            raw_to_tokens(self.virtual_token_reserves),
            lamports_to_sol(self.real_sol_reserves),
            raw_to_tokens(self.token_total_supply),
            observed_at,
        )
    }
}

/// Metaplex token metadata, decoded just far enough for [`TokenInfo`].
///
/// The full Metaplex layout carries creators, editions and collection
/// details this crate has no use for; only the leading fixed fields and
/// the three length-prefixed strings are read.
#[derive(Debug, Clone)]
pub struct TokenMetadata {
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl TokenMetadata {
    /// Parse a Metaplex `Metadata` account: 1 key byte, update authority,
    /// mint, then borsh-style `u32`-length-prefixed name/symbol/uri. The
    /// strings are padded with NULs to fixed capacity on chain.
    pub fn decode(data: &[u8]) -> Result<Self, LaunchpadError> {
        let mut cursor = data;

        if cursor.is_empty() {
            return Err(LaunchpadError::Encoding(
                "metadata account is empty".to_string(),
            ));
        }
        cursor = &cursor[1..]; // key byte

        let update_authority = read_pubkey(&mut cursor)?;
        let mint = read_pubkey(&mut cursor)?;
        let name = read_padded_string(&mut cursor)?;
        let symbol = read_padded_string(&mut cursor)?;
        let uri = read_padded_string(&mut cursor)?;

        Ok(Self {
            update_authority,
            mint,
            name,
            symbol,
            uri,
        })
    }

    pub fn into_token_info(self, created_at: Option<DateTime<Utc>>) -> TokenInfo {
        TokenInfo {
            mint: self.mint.to_string(),
            symbol: self.symbol,
            name: self.name,
            uri: if self.uri.is_empty() {
                None
            } else {
                Some(self.uri)
            },
            created_at,
        }
    }
}

fn read_pubkey(cursor: &mut &[u8]) -> Result<Pubkey, LaunchpadError> {
    if cursor.len() < 32 {
        return Err(LaunchpadError::Encoding(
            "metadata account truncated reading pubkey".to_string(),
        ));
    }
    let (head, tail) = cursor.split_at(32);
    *cursor = tail;
    Pubkey::try_from(head).map_err(|e| LaunchpadError::Encoding(e.to_string()))
}

fn read_padded_string(cursor: &mut &[u8]) -> Result<String, LaunchpadError> {
    if cursor.len() < 4 {
        return Err(LaunchpadError::Encoding(
            "metadata account truncated reading string length".to_string(),
        ));
    }
    let (len_bytes, tail) = cursor.split_at(4);
    let len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
    if tail.len() < len {
        return Err(LaunchpadError::Encoding(format!(
            "metadata string of {} bytes exceeds remaining {}",
            len,
            tail.len()
        )));
    }
    let (body, rest) = tail.split_at(len);
    *cursor = rest;

    let text = String::from_utf8(body.to_vec())
        .map_err(|e| LaunchpadError::Encoding(format!("metadata string not utf8: {}", e)))?;
    Ok(text.trim_end_matches('\0').to_string())
}

/// Lamports to SOL.
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from(lamports) / LAMPORTS_PER_SOL_DEC
}

/// SOL to lamports, rounding up. Used for worst-case cost bounds so the
/// on-chain limit is never tighter than the quoted one.
pub fn sol_to_lamports_ceil(sol: Decimal) -> Result<u64, CurveError> {
    decimal_to_u64(
        sol * LAMPORTS_PER_SOL_DEC,
        RoundingStrategy::AwayFromZero,
        "sol amount",
    )
}

/// SOL to lamports, rounding down. Used for minimum-output bounds on
/// sells so the on-chain floor is never higher than the quoted one.
pub fn sol_to_lamports_floor(sol: Decimal) -> Result<u64, CurveError> {
    decimal_to_u64(
        sol * LAMPORTS_PER_SOL_DEC,
        RoundingStrategy::ToZero,
        "sol amount",
    )
}

/// Raw token units to whole tokens.
pub fn raw_to_tokens(raw: u64) -> Decimal {
    Decimal::from(raw) / RAW_PER_TOKEN
}

/// Whole tokens to raw units, rounding down. Used for minimum-output
/// bounds so the on-chain floor is never higher than the quoted one.
pub fn tokens_to_raw_floor(tokens: Decimal) -> Result<u64, CurveError> {
    decimal_to_u64(tokens * RAW_PER_TOKEN, RoundingStrategy::ToZero, "token amount")
}

fn decimal_to_u64(
    value: Decimal,
    rounding: RoundingStrategy,
    what: &str,
) -> Result<u64, CurveError> {
    let rounded = value.round_dp_with_strategy(0, rounding);
    if rounded < Decimal::ZERO {
        return Err(CurveError::InvalidInput(format!(
            "{} must not be negative, got {}",
            what, rounded
        )));
    }
    u64::try_from(rounded.trunc().mantissa())
        .map_err(|_| CurveError::InvalidInput(format!("{} {} overflows u64", what, rounded)))
}
