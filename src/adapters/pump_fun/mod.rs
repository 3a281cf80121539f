//! Pump.fun Launchpad Adapter
//!
//! The one fully chain-backed launchpad variant. Reads bonding-curve and
//! metadata accounts through the [`ChainReader`] port, quotes trades with
//! the shared curve model, and builds signed buy/sell transactions behind
//! the allowlist / validate / sanitize pipeline.

pub mod instructions;
pub mod state;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::curve::{CurveModel, CurveState, Quote};
use crate::ports::chain::ChainReader;
use crate::ports::launchpad::{LaunchpadAdapter, LaunchpadError, LaunchpadKind, TokenInfo};
use crate::safety::allowlist::AllowlistManager;
use crate::safety::sanitizer::{BehaviorSanitizer, SanitizePolicy};
use crate::safety::validator::InstructionValidator;

use instructions::{
    build_buy_instruction, build_sell_instruction, find_bonding_curve_pda, find_creator_vault_pda,
    find_metadata_pda, BUY_ACCOUNT_COUNT, PUMP_FUN_FEE_BPS, PUMP_FUN_PROGRAM_ID,
    SELL_ACCOUNT_COUNT,
};
use state::{
    sol_to_lamports_ceil, sol_to_lamports_floor, tokens_to_raw_floor, BondingCurveAccount,
    TokenMetadata,
};

/// Chain-backed adapter for the Pump.fun bonding-curve program.
pub struct PumpFunAdapter {
    program_id: Pubkey,
    chain: Arc<dyn ChainReader>,
    allowlist: Arc<AllowlistManager>,
    validator: InstructionValidator,
    sanitizer: BehaviorSanitizer,
    model: CurveModel,
}

impl PumpFunAdapter {
    /// Create an adapter with its own allowlist, pre-seeded with the
    /// Pump.fun program id.
    pub fn new(chain: Arc<dyn ChainReader>) -> Result<Self, LaunchpadError> {
        let allowlist = Arc::new(AllowlistManager::seeded(&PUMP_FUN_PROGRAM_ID));
        Self::with_allowlist(chain, allowlist)
    }

    /// Create an adapter sharing an externally-managed allowlist. The
    /// caller is responsible for seeding it; an unseeded allowlist makes
    /// every build fail with [`LaunchpadError::ProgramNotAllowed`].
    pub fn with_allowlist(
        chain: Arc<dyn ChainReader>,
        allowlist: Arc<AllowlistManager>,
    ) -> Result<Self, LaunchpadError> {
        Ok(Self {
            program_id: PUMP_FUN_PROGRAM_ID,
            chain,
            allowlist,
            validator: InstructionValidator::new(),
            // Pump.fun decodes accounts positionally; reordering stays off.
            sanitizer: BehaviorSanitizer::new(SanitizePolicy::default()),
            model: CurveModel::new(PUMP_FUN_FEE_BPS)?,
        })
    }

    /// The allowlist gating this adapter's transaction builds.
    pub fn allowlist(&self) -> &Arc<AllowlistManager> {
        &self.allowlist
    }

    /// Quote a buy against the live curve without building a transaction.
    pub async fn quote_buy(
        &self,
        token_mint: &Pubkey,
        sol_amount: Decimal,
        slippage: Decimal,
    ) -> Result<Quote, LaunchpadError> {
        let (_, account) = self.load_curve(token_mint).await?;
        let state = account.to_curve_state(token_mint, Utc::now())?;
        Ok(self.model.quote_buy(&state, sol_amount, slippage)?)
    }

    /// Gate the build pipeline on the allowlist. Must run before any
    /// transport call so a disallowed program never causes network I/O.
    fn gate(&self) -> Result<(), LaunchpadError> {
        if !self.allowlist.is_allowed(&self.program_id) {
            return Err(LaunchpadError::ProgramNotAllowed(
                self.program_id.to_string(),
            ));
        }
        Ok(())
    }

    async fn load_curve(
        &self,
        token_mint: &Pubkey,
    ) -> Result<(Pubkey, BondingCurveAccount), LaunchpadError> {
        let (curve_pda, _) = find_bonding_curve_pda(token_mint, &self.program_id);
        let data = self.chain.read_account(&curve_pda).await?;
        let account = BondingCurveAccount::decode(&data)?;
        debug!(
            mint = %token_mint,
            curve = %curve_pda,
            virtual_sol = account.virtual_sol_reserves,
            virtual_tokens = account.virtual_token_reserves,
            complete = account.complete,
            "loaded bonding curve"
        );
        Ok((curve_pda, account))
    }

    /// Reject trades against a completed curve; liquidity has migrated
    /// and the buy/sell instructions would fail on chain.
    fn check_tradeable(&self, account: &BondingCurveAccount) -> Result<(), LaunchpadError> {
        if account.complete {
            return Err(LaunchpadError::InvalidInput(
                "bonding curve is complete; token has migrated off the launchpad".to_string(),
            ));
        }
        Ok(())
    }

    async fn finalize(
        &self,
        instruction: solana_sdk::instruction::Instruction,
        required_accounts: usize,
        signer: &Keypair,
    ) -> Result<Transaction, LaunchpadError> {
        self.validator.validate(&instruction, &self.program_id)?;
        self.validator
            .validate_account_count(&instruction, required_accounts)?;
        let instruction = self.sanitizer.sanitize(&instruction);

        let blockhash = self.chain.latest_blockhash().await?;
        let message = Message::new(&[instruction], Some(&signer.pubkey()));
        let mut transaction = Transaction::new_unsigned(message);
        transaction
            .try_sign(&[signer], blockhash)
            .map_err(|e| LaunchpadError::Signing(e.to_string()))?;
        Ok(transaction)
    }
}

#[async_trait]
impl LaunchpadAdapter for PumpFunAdapter {
    fn kind(&self) -> LaunchpadKind {
        LaunchpadKind::PumpFun
    }

    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    async fn fetch_curve_data(&self, token_mint: &Pubkey) -> Result<CurveState, LaunchpadError> {
        let (_, account) = self.load_curve(token_mint).await?;
        Ok(account.to_curve_state(token_mint, Utc::now())?)
    }

    async fn fetch_token_info(&self, token_mint: &Pubkey) -> Result<TokenInfo, LaunchpadError> {
        let (metadata_pda, _) = find_metadata_pda(token_mint);
        let data = self.chain.read_account(&metadata_pda).await?;
        let metadata = TokenMetadata::decode(&data)?;

        if metadata.mint != *token_mint {
            return Err(LaunchpadError::InvalidInput(format!(
                "metadata account is for mint {}, requested {}",
                metadata.mint, token_mint
            )));
        }
        Ok(metadata.into_token_info(None))
    }

    async fn build_buy_transaction(
        &self,
        buyer: &Keypair,
        token_mint: &Pubkey,
        sol_amount: Decimal,
        slippage: Decimal,
    ) -> Result<Transaction, LaunchpadError> {
        self.gate()?;

        let (curve_pda, account) = self.load_curve(token_mint).await?;
        self.check_tradeable(&account)?;

        let state = account.to_curve_state(token_mint, Utc::now())?;
        let quote = self.model.quote_buy(&state, sol_amount, slippage)?;

        // The program enforces the slippage bounds: it reverts below the
        // minimum token output and above the maximum SOL cost.
        let token_amount = tokens_to_raw_floor(quote.min_output)?;
        let max_sol_cost = sol_to_lamports_ceil(quote.max_input)?;

        let (creator_vault, _) = find_creator_vault_pda(&account.creator, &self.program_id);
        let instruction = build_buy_instruction(
            &buyer.pubkey(),
            token_mint,
            &curve_pda,
            &creator_vault,
            token_amount,
            max_sol_cost,
        )?;

        let transaction = self.finalize(instruction, BUY_ACCOUNT_COUNT, buyer).await?;
        info!(
            mint = %token_mint,
            sol_amount = %sol_amount,
            min_tokens_out = token_amount,
            max_sol_cost,
            "built buy transaction"
        );
        Ok(transaction)
    }

    async fn build_sell_transaction(
        &self,
        seller: &Keypair,
        token_mint: &Pubkey,
        token_amount: Decimal,
        slippage: Decimal,
    ) -> Result<Transaction, LaunchpadError> {
        self.gate()?;

        let (curve_pda, account) = self.load_curve(token_mint).await?;
        self.check_tradeable(&account)?;

        let state = account.to_curve_state(token_mint, Utc::now())?;
        let quote = self.model.quote_sell(&state, token_amount, slippage)?;

        let raw_amount = tokens_to_raw_floor(token_amount)?;
        let min_sol_output = sol_to_lamports_floor(quote.min_output)?;

        let instruction = build_sell_instruction(
            &seller.pubkey(),
            token_mint,
            &curve_pda,
            raw_amount,
            min_sol_output,
        )?;

        let transaction = self
            .finalize(instruction, SELL_ACCOUNT_COUNT, seller)
            .await?;
        info!(
            mint = %token_mint,
            token_amount = %token_amount,
            min_sol_output,
            "built sell transaction"
        );
        Ok(transaction)
    }
}
