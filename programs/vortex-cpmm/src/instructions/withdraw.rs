use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::engine;
use crate::errors::AmmError;
use crate::events::LiquidityRemoved;
use crate::state::PoolState;
use crate::utils::{settle_transfers, token_burn, TokenLeg};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Liquidity provider
    pub owner: Signer<'info>,

    /// CHECK: vault and LP mint authority
    #[account(seeds = [AUTH_SEED], bump = pool_state.auth_bump)]
    pub authority: UncheckedAccount<'info>,

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

    /// Owner LP token account
    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = owner,
    )]
    pub owner_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives token 0
    #[account(mut, token::mint = vault_0_mint)]
    pub token_0_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives token 1
    #[account(mut, token::mint = vault_1_mint)]
    pub token_1_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.token_0_vault @ AmmError::InvalidVault
    )]
    pub token_0_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.token_1_vault @ AmmError::InvalidVault
    )]
    pub token_1_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// LP mint program
    pub token_program: Program<'info, Token>,

    #[account(address = pool_state.token_0_program @ AmmError::InvalidInput)]
    pub token_0_program: Interface<'info, TokenInterface>,

    #[account(address = pool_state.token_1_program @ AmmError::InvalidInput)]
    pub token_1_program: Interface<'info, TokenInterface>,

    #[account(address = pool_state.token_0_mint @ AmmError::AssetMismatch)]
    pub vault_0_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool_state.token_1_mint @ AmmError::AssetMismatch)]
    pub vault_1_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        address = pool_state.lp_mint @ AmmError::AssetMismatch
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,
}

pub fn handler(
    ctx: Context<Withdraw>,
    lp_token_amount: u64,
    minimum_token_0_amount: u64,
    minimum_token_1_amount: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let pool_state = &mut ctx.accounts.pool_state;
    require!(
        pool_state.vaults_cover_ledger(
            ctx.accounts.token_0_vault.amount,
            ctx.accounts.token_1_vault.amount
        ),
        AmmError::VaultBalanceMismatch
    );

    let receipt = engine::withdraw(
        pool_state,
        lp_token_amount,
        ctx.accounts.owner_lp_token.amount,
        minimum_token_0_amount,
        minimum_token_1_amount,
        clock.unix_timestamp,
    )?;

    token_burn(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.lp_mint.to_account_info(),
        ctx.accounts.owner_lp_token.to_account_info(),
        receipt.settlement.lp_burn,
    )?;

    let legs = [
        TokenLeg {
            vault: ctx.accounts.token_0_vault.to_account_info(),
            counterparty: ctx.accounts.token_0_account.to_account_info(),
            mint: ctx.accounts.vault_0_mint.to_account_info(),
            token_program: ctx.accounts.token_0_program.to_account_info(),
            decimals: ctx.accounts.vault_0_mint.decimals,
        },
        TokenLeg {
            vault: ctx.accounts.token_1_vault.to_account_info(),
            counterparty: ctx.accounts.token_1_account.to_account_info(),
            mint: ctx.accounts.vault_1_mint.to_account_info(),
            token_program: ctx.accounts.token_1_program.to_account_info(),
            decimals: ctx.accounts.vault_1_mint.decimals,
        },
    ];
    settle_transfers(
        &receipt.settlement,
        &legs,
        &ctx.accounts.owner.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        &[&[AUTH_SEED, &[pool_state.auth_bump]]],
    )?;

    emit!(LiquidityRemoved {
        pool: pool_state.key(),
        user: ctx.accounts.owner.key(),
        lp_burned: receipt.lp_amount,
        amount_0: receipt.token_0_amount,
        amount_1: receipt.token_1_amount,
        reserve_0: receipt.snapshot.reserve_0,
        reserve_1: receipt.snapshot.reserve_1,
        lp_supply: receipt.snapshot.lp_supply,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Withdrew {} token 0 and {} token 1 for {} LP",
        receipt.token_0_amount,
        receipt.token_1_amount,
        receipt.lp_amount
    );

    Ok(())
}
