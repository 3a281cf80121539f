//! Pump.fun Instruction Encoding
//!
//! Program constants, PDA derivation and the discriminator-prefixed
//! buy/sell payload layout. Account lists are positional and must match
//! the on-chain program's expected order exactly; the sanitizer is never
//! allowed to reorder them for this variant.

use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::{pubkey, pubkey::Pubkey, system_program};
use spl_associated_token_account::{
    get_associated_token_address, ID as ASSOCIATED_TOKEN_PROGRAM_ID,
};
use spl_token::ID as TOKEN_PROGRAM_ID;

use crate::ports::launchpad::LaunchpadError;

/// Pump.fun program (mainnet)
pub const PUMP_FUN_PROGRAM_ID: Pubkey = pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");
/// Global state account holding fee configuration and initial reserves
pub const GLOBAL_STATE: Pubkey = pubkey!("4wTV1YmiEkRvAtNtsSGPtUrqRYQMe5SKy2uB4Jjaxnjf");
/// Protocol fee recipient
pub const FEE_RECIPIENT: Pubkey = pubkey!("CebN5WGQ4jvEPvsVU4EoHEpgzq1VV7AbicfhtW4xC9iM");
/// Event authority PDA the program emits CPI logs through
pub const EVENT_AUTHORITY: Pubkey = pubkey!("Ce6TQqeHC9p8KetsN6JsjHK7UTZk7nasjjnr7XxXp9F1");
/// Metaplex token metadata program
pub const METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// Pump.fun trade fee in basis points (1%)
pub const PUMP_FUN_FEE_BPS: u32 = 100;

/// Anchor sighash("global", "buy")
const BUY_DISCRIMINATOR: [u8; 8] = [0x66, 0x06, 0x3d, 0x12, 0x01, 0xda, 0xeb, 0xea];
/// Anchor sighash("global", "sell")
const SELL_DISCRIMINATOR: [u8; 8] = [0x33, 0xe6, 0x85, 0xa4, 0x01, 0x7f, 0x83, 0xad];

/// Accounts a well-formed buy instruction must carry.
pub const BUY_ACCOUNT_COUNT: usize = 12;
/// Accounts a well-formed sell instruction must carry.
pub const SELL_ACCOUNT_COUNT: usize = 12;

/// Derive the bonding-curve PDA for a mint.
pub fn find_bonding_curve_pda(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"bonding-curve", mint.as_ref()], program_id)
}

/// Derive the creator-vault PDA that collects the creator's fee share.
pub fn find_creator_vault_pda(creator: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"creator-vault", creator.as_ref()], program_id)
}

/// Derive the Metaplex metadata PDA for a mint.
pub fn find_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"metadata", METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
}

#[derive(BorshSerialize)]
struct BuyArgs {
    /// Minimum token amount out; the program reverts below this
    amount: u64,
    max_sol_cost: u64,
}

#[derive(BorshSerialize)]
struct SellArgs {
    amount: u64,
    min_sol_output: u64,
}

fn encode<T: BorshSerialize>(discriminator: [u8; 8], args: &T) -> Result<Vec<u8>, LaunchpadError> {
    let mut data = discriminator.to_vec();
    args.serialize(&mut data)
        .map_err(|e| LaunchpadError::Encoding(e.to_string()))?;
    Ok(data)
}

/// Build the buy instruction against a bonding curve.
pub fn build_buy_instruction(
    buyer: &Pubkey,
    mint: &Pubkey,
    bonding_curve: &Pubkey,
    creator_vault: &Pubkey,
    token_amount: u64,
    max_sol_cost: u64,
) -> Result<Instruction, LaunchpadError> {
    let buyer_ata = get_associated_token_address(buyer, mint);
    let curve_vault_ata = get_associated_token_address(bonding_curve, mint);

    let data = encode(
        BUY_DISCRIMINATOR,
        &BuyArgs {
            amount: token_amount,
            max_sol_cost,
        },
    )?;

    // Positional account order required by the program
    let accounts = vec![
        AccountMeta::new_readonly(GLOBAL_STATE, false),
        AccountMeta::new(FEE_RECIPIENT, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(*bonding_curve, false),
        AccountMeta::new(curve_vault_ata, false),
        AccountMeta::new(buyer_ata, false),
        AccountMeta::new(*buyer, true),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new(*creator_vault, false),
        AccountMeta::new_readonly(EVENT_AUTHORITY, false),
        AccountMeta::new_readonly(PUMP_FUN_PROGRAM_ID, false),
    ];

    Ok(Instruction {
        program_id: PUMP_FUN_PROGRAM_ID,
        accounts,
        data,
    })
}

/// Build the sell instruction against a bonding curve.
pub fn build_sell_instruction(
    seller: &Pubkey,
    mint: &Pubkey,
    bonding_curve: &Pubkey,
    token_amount: u64,
    min_sol_output: u64,
) -> Result<Instruction, LaunchpadError> {
    let seller_ata = get_associated_token_address(seller, mint);
    let curve_vault_ata = get_associated_token_address(bonding_curve, mint);

    let data = encode(
        SELL_DISCRIMINATOR,
        &SellArgs {
            amount: token_amount,
            min_sol_output,
        },
    )?;

    let accounts = vec![
        AccountMeta::new_readonly(GLOBAL_STATE, false),
        AccountMeta::new(FEE_RECIPIENT, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(*bonding_curve, false),
        AccountMeta::new(curve_vault_ata, false),
        AccountMeta::new(seller_ata, false),
        AccountMeta::new(*seller, true),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(EVENT_AUTHORITY, false),
        AccountMeta::new_readonly(PUMP_FUN_PROGRAM_ID, false),
    ];

    Ok(Instruction {
        program_id: PUMP_FUN_PROGRAM_ID,
        accounts,
        data,
    })
}
