use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::curve::TradeDirection;
use crate::engine::{self, SwapReceipt};
use crate::errors::AmmError;
use crate::events::SwapExecuted;
use crate::state::{AmmConfig, ObservationState, PoolState, TokenSide};
use crate::utils::{settle_transfers, TokenLeg};

#[derive(Accounts)]
pub struct Swap<'info> {
    /// User performing the swap
    pub payer: Signer<'info>,

    /// CHECK: vault and LP mint authority
    #[account(seeds = [AUTH_SEED], bump = pool_state.auth_bump)]
    pub authority: UncheckedAccount<'info>,

    /// Fee schedule the pool belongs to
    #[account(address = pool_state.amm_config @ AmmError::InvalidInput)]
    pub amm_config: Box<Account<'info, AmmConfig>>,

    #[account(
        mut,
        seeds = [
            POOL_SEED,
            pool_state.amm_config.as_ref(),
            pool_state.token_0_mint.as_ref(),
            pool_state.token_1_mint.as_ref(),
        ],
        bump = pool_state.bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// User account paying the input token
    #[account(mut, token::mint = input_token_mint)]
    pub input_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User account receiving the output token
    #[account(mut, token::mint = output_token_mint)]
    pub output_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub input_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub output_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub input_token_program: Interface<'info, TokenInterface>,

    pub output_token_program: Interface<'info, TokenInterface>,

    #[account(address = input_vault.mint @ AmmError::AssetMismatch)]
    pub input_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = output_vault.mint @ AmmError::AssetMismatch)]
    pub output_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        address = pool_state.observation_key @ AmmError::InvalidInput
    )]
    pub observation_state: AccountLoader<'info, ObservationState>,
}

impl<'info> Swap<'info> {
    /// Check that the vaults, mints and programs line up with the pool for
    /// the direction implied by the input mint.
    pub fn validate_route(&self) -> Result<()> {
        let pool_state = &self.pool_state;
        let direction = pool_state.trade_direction(&self.input_token_mint.key())?;
        let (input_side, output_side) = match direction {
            TradeDirection::ZeroForOne => (TokenSide::Token0, TokenSide::Token1),
            TradeDirection::OneForZero => (TokenSide::Token1, TokenSide::Token0),
        };

        require_keys_eq!(
            self.output_token_mint.key(),
            pool_state.mint(output_side),
            AmmError::AssetMismatch
        );
        require_keys_eq!(
            self.input_vault.key(),
            pool_state.vault(input_side),
            AmmError::InvalidVault
        );
        require_keys_eq!(
            self.output_vault.key(),
            pool_state.vault(output_side),
            AmmError::InvalidVault
        );
        require_keys_eq!(
            self.input_token_program.key(),
            pool_state.token_program(input_side),
            AmmError::InvalidInput
        );
        require_keys_eq!(
            self.output_token_program.key(),
            pool_state.token_program(output_side),
            AmmError::InvalidInput
        );

        let (vault_0_balance, vault_1_balance) = match input_side {
            TokenSide::Token0 => (self.input_vault.amount, self.output_vault.amount),
            TokenSide::Token1 => (self.output_vault.amount, self.input_vault.amount),
        };
        require!(
            pool_state.vaults_cover_ledger(vault_0_balance, vault_1_balance),
            AmmError::VaultBalanceMismatch
        );

        Ok(())
    }

    /// Move the tokens of a completed swap and emit its event
    pub fn settle(&self, receipt: &SwapReceipt, base_input: bool, timestamp: i64) -> Result<()> {
        let input_leg = TokenLeg {
            vault: self.input_vault.to_account_info(),
            counterparty: self.input_token_account.to_account_info(),
            mint: self.input_token_mint.to_account_info(),
            token_program: self.input_token_program.to_account_info(),
            decimals: self.input_token_mint.decimals,
        };
        let output_leg = TokenLeg {
            vault: self.output_vault.to_account_info(),
            counterparty: self.output_token_account.to_account_info(),
            mint: self.output_token_mint.to_account_info(),
            token_program: self.output_token_program.to_account_info(),
            decimals: self.output_token_mint.decimals,
        };
        let legs = match receipt.input_side {
            TokenSide::Token0 => [input_leg, output_leg],
            TokenSide::Token1 => [output_leg, input_leg],
        };

        settle_transfers(
            &receipt.settlement,
            &legs,
            &self.payer.to_account_info(),
            &self.authority.to_account_info(),
            &[&[AUTH_SEED, &[self.pool_state.auth_bump]]],
        )?;

        emit!(SwapExecuted {
            pool: self.pool_state.key(),
            user: self.payer.key(),
            token_in: self.input_token_mint.key(),
            token_out: self.output_token_mint.key(),
            amount_in: receipt.amount_in,
            amount_out: receipt.amount_out,
            trade_fee: receipt.trade_fee,
            protocol_fee: receipt.protocol_fee,
            fund_fee: receipt.fund_fee,
            base_input,
            reserve_0: receipt.snapshot.reserve_0,
            reserve_1: receipt.snapshot.reserve_1,
            timestamp,
        });

        msg!(
            "Swapped {} for {}, fee: {}",
            receipt.amount_in,
            receipt.amount_out,
            receipt.trade_fee
        );

        Ok(())
    }
}

pub fn handler(ctx: Context<Swap>, amount_in: u64, minimum_amount_out: u64) -> Result<()> {
    ctx.accounts.validate_route()?;
    let clock = Clock::get()?;
    let input_mint = ctx.accounts.input_token_mint.key();

    let receipt = {
        let mut observation_state = ctx.accounts.observation_state.load_mut()?;
        engine::swap_base_input(
            &mut ctx.accounts.pool_state,
            &ctx.accounts.amm_config,
            &mut observation_state,
            &input_mint,
            amount_in,
            minimum_amount_out,
            clock.unix_timestamp,
        )?
    };

    ctx.accounts.settle(&receipt, true, clock.unix_timestamp)
}
