use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::engine::{collect_fees, FeeRecipient};
use crate::errors::AmmError;
use crate::events::FeesCollected;
use crate::state::{AmmConfig, PoolState};
use crate::utils::{settle_transfers, TokenLeg};

/// Accounts for paying out owed protocol or fund fees
#[derive(Accounts)]
pub struct CollectFee<'info> {
    /// Protocol or fund owner of the pool's config, or the program admin
    pub owner: Signer<'info>,

    /// CHECK: vault and LP mint authority
    #[account(seeds = [AUTH_SEED], bump)]
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

    #[account(address = pool_state.amm_config @ AmmError::InvalidInput)]
    pub amm_config: Box<Account<'info, AmmConfig>>,

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

    #[account(address = pool_state.token_0_mint @ AmmError::AssetMismatch)]
    pub vault_0_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool_state.token_1_mint @ AmmError::AssetMismatch)]
    pub vault_1_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Recipient token 0 account
    #[account(
        mut,
        token::mint = vault_0_mint,
        token::token_program = token_0_program,
    )]
    pub recipient_token_0_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Recipient token 1 account
    #[account(
        mut,
        token::mint = vault_1_mint,
        token::token_program = token_1_program,
    )]
    pub recipient_token_1_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = pool_state.token_0_program @ AmmError::InvalidInput)]
    pub token_0_program: Interface<'info, TokenInterface>,

    #[account(address = pool_state.token_1_program @ AmmError::InvalidInput)]
    pub token_1_program: Interface<'info, TokenInterface>,
}

pub fn handler(
    ctx: Context<CollectFee>,
    recipient: FeeRecipient,
    amount_0_requested: u64,
    amount_1_requested: u64,
) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let amm_config = &ctx.accounts.amm_config;
    let recipient_owner = match recipient {
        FeeRecipient::Protocol => amm_config.protocol_owner,
        FeeRecipient::Fund => amm_config.fund_owner,
    };
    require!(
        owner == recipient_owner || owner == crate::admin::ID,
        AmmError::InvalidOwner
    );

    let clock = Clock::get()?;
    let pool_state = &mut ctx.accounts.pool_state;
    require!(
        pool_state.vaults_cover_ledger(
            ctx.accounts.token_0_vault.amount,
            ctx.accounts.token_1_vault.amount
        ),
        AmmError::VaultBalanceMismatch
    );

    let receipt = collect_fees(
        pool_state,
        recipient,
        amount_0_requested,
        amount_1_requested,
        clock.unix_timestamp,
    )?;

    let legs = [
        TokenLeg {
            vault: ctx.accounts.token_0_vault.to_account_info(),
            counterparty: ctx.accounts.recipient_token_0_account.to_account_info(),
            mint: ctx.accounts.vault_0_mint.to_account_info(),
            token_program: ctx.accounts.token_0_program.to_account_info(),
            decimals: ctx.accounts.vault_0_mint.decimals,
        },
        TokenLeg {
            vault: ctx.accounts.token_1_vault.to_account_info(),
            counterparty: ctx.accounts.recipient_token_1_account.to_account_info(),
            mint: ctx.accounts.vault_1_mint.to_account_info(),
            token_program: ctx.accounts.token_1_program.to_account_info(),
            decimals: ctx.accounts.vault_1_mint.decimals,
        },
    ];
    let auth_bump = pool_state.auth_bump;
    settle_transfers(
        &receipt.settlement,
        &legs,
        &ctx.accounts.owner.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        &[&[AUTH_SEED, &[auth_bump]]],
    )?;

    emit!(FeesCollected {
        pool: pool_state.key(),
        recipient: recipient_owner,
        is_protocol: recipient == FeeRecipient::Protocol,
        amount_0: receipt.amount_0,
        amount_1: receipt.amount_1,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Collected {:?} fees: {} token 0, {} token 1",
        recipient,
        receipt.amount_0,
        receipt.amount_1
    );

    Ok(())
}
