use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::Token;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::engine::{self, PoolKeys};
use crate::errors::AmmError;
use crate::events::PoolCreated;
use crate::state::{AmmConfig, ObservationState, PoolState};
use crate::utils::{is_supported_mint, settle_transfers, token_mint_to, TokenLeg};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pool creator, pays for every account
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Fee schedule the pool belongs to
    pub amm_config: Box<Account<'info, AmmConfig>>,

    /// CHECK: vault and LP mint authority
    #[account(seeds = [AUTH_SEED], bump)]
    pub authority: UncheckedAccount<'info>,

    /// Pool state account
    #[account(
        init,
        payer = creator,
        space = DISCRIMINATOR + PoolState::INIT_SPACE,
        seeds = [
            POOL_SEED,
            amm_config.key().as_ref(),
            token_0_mint.key().as_ref(),
            token_1_mint.key().as_ref(),
        ],
        bump
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// Token 0 mint, must sort below token 1 mint
    #[account(
        constraint = token_0_mint.key() < token_1_mint.key() @ AmmError::InvalidMintOrder,
        mint::token_program = token_0_program,
    )]
    pub token_0_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token 1 mint
    #[account(mint::token_program = token_1_program)]
    pub token_1_mint: Box<InterfaceAccount<'info, Mint>>,

    /// LP token mint
    #[account(
        init,
        payer = creator,
        seeds = [POOL_LP_MINT_SEED, pool_state.key().as_ref()],
        bump,
        mint::decimals = LP_MINT_DECIMALS,
        mint::authority = authority,
        mint::token_program = token_program,
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Creator token 0 account
    #[account(
        mut,
        token::mint = token_0_mint,
        token::authority = creator,
        token::token_program = token_0_program,
    )]
    pub creator_token_0: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator token 1 account
    #[account(
        mut,
        token::mint = token_1_mint,
        token::authority = creator,
        token::token_program = token_1_program,
    )]
    pub creator_token_1: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator LP token account
    #[account(
        init,
        payer = creator,
        associated_token::mint = lp_mint,
        associated_token::authority = creator,
        associated_token::token_program = token_program,
    )]
    pub creator_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token 0 vault
    #[account(
        init,
        payer = creator,
        seeds = [POOL_VAULT_SEED, pool_state.key().as_ref(), token_0_mint.key().as_ref()],
        bump,
        token::mint = token_0_mint,
        token::authority = authority,
        token::token_program = token_0_program,
    )]
    pub token_0_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token 1 vault
    #[account(
        init,
        payer = creator,
        seeds = [POOL_VAULT_SEED, pool_state.key().as_ref(), token_1_mint.key().as_ref()],
        bump,
        token::mint = token_1_mint,
        token::authority = authority,
        token::token_program = token_1_program,
    )]
    pub token_1_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Price observation log
    #[account(
        init,
        payer = creator,
        space = DISCRIMINATOR + std::mem::size_of::<ObservationState>(),
        seeds = [OBSERVATION_SEED, pool_state.key().as_ref()],
        bump,
    )]
    pub observation_state: AccountLoader<'info, ObservationState>,

    /// CHECK: receives the pool creation fee
    #[account(
        mut,
        address = amm_config.protocol_owner @ AmmError::InvalidOwner
    )]
    pub create_pool_fee_receiver: UncheckedAccount<'info>,

    /// LP mint program
    pub token_program: Program<'info, Token>,
    pub token_0_program: Interface<'info, TokenInterface>,
    pub token_1_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    init_amount_0: u64,
    init_amount_1: u64,
    open_time: u64,
) -> Result<()> {
    require!(
        is_supported_mint(&ctx.accounts.token_0_mint)?
            && is_supported_mint(&ctx.accounts.token_1_mint)?,
        AmmError::UnsupportedMint
    );

    let clock = Clock::get()?;
    let keys = PoolKeys {
        bump: ctx.bumps.pool_state,
        auth_bump: ctx.bumps.authority,
        amm_config: ctx.accounts.amm_config.key(),
        pool_creator: ctx.accounts.creator.key(),
        token_0_mint: ctx.accounts.token_0_mint.key(),
        token_1_mint: ctx.accounts.token_1_mint.key(),
        token_0_vault: ctx.accounts.token_0_vault.key(),
        token_1_vault: ctx.accounts.token_1_vault.key(),
        token_0_program: ctx.accounts.token_0_program.key(),
        token_1_program: ctx.accounts.token_1_program.key(),
        lp_mint: ctx.accounts.lp_mint.key(),
        observation_key: ctx.accounts.observation_state.key(),
        mint_0_decimals: ctx.accounts.token_0_mint.decimals,
        mint_1_decimals: ctx.accounts.token_1_mint.decimals,
        lp_mint_decimals: ctx.accounts.lp_mint.decimals,
    };

    let pool_key = ctx.accounts.pool_state.key();
    let receipt = engine::initialize(
        &mut ctx.accounts.pool_state,
        &ctx.accounts.amm_config,
        keys,
        init_amount_0,
        init_amount_1,
        open_time,
        clock.unix_timestamp,
    )?;
    ctx.accounts.observation_state.load_init()?.pool_id = pool_key;

    if receipt.settlement.lamports_fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.creator.to_account_info(),
                    to: ctx.accounts.create_pool_fee_receiver.to_account_info(),
                },
            ),
            receipt.settlement.lamports_fee,
        )?;
    }

    let legs = [
        TokenLeg {
            vault: ctx.accounts.token_0_vault.to_account_info(),
            counterparty: ctx.accounts.creator_token_0.to_account_info(),
            mint: ctx.accounts.token_0_mint.to_account_info(),
            token_program: ctx.accounts.token_0_program.to_account_info(),
            decimals: ctx.accounts.token_0_mint.decimals,
        },
        TokenLeg {
            vault: ctx.accounts.token_1_vault.to_account_info(),
            counterparty: ctx.accounts.creator_token_1.to_account_info(),
            mint: ctx.accounts.token_1_mint.to_account_info(),
            token_program: ctx.accounts.token_1_program.to_account_info(),
            decimals: ctx.accounts.token_1_mint.decimals,
        },
    ];
    let signer_seeds: &[&[&[u8]]] = &[&[AUTH_SEED, &[ctx.bumps.authority]]];
    settle_transfers(
        &receipt.settlement,
        &legs,
        &ctx.accounts.creator.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        signer_seeds,
    )?;

    token_mint_to(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.lp_mint.to_account_info(),
        ctx.accounts.creator_lp_token.to_account_info(),
        receipt.settlement.lp_mint,
        signer_seeds,
    )?;

    ctx.accounts.token_0_vault.reload()?;
    ctx.accounts.token_1_vault.reload()?;
    require!(
        ctx.accounts.pool_state.vaults_cover_ledger(
            ctx.accounts.token_0_vault.amount,
            ctx.accounts.token_1_vault.amount
        ),
        AmmError::VaultBalanceMismatch
    );

    let pool_state = &ctx.accounts.pool_state;
    emit!(PoolCreated {
        pool: pool_key,
        amm_config: pool_state.amm_config,
        creator: pool_state.pool_creator,
        token_0_mint: pool_state.token_0_mint,
        token_1_mint: pool_state.token_1_mint,
        lp_mint: pool_state.lp_mint,
        init_amount_0,
        init_amount_1,
        lp_amount: receipt.lp_amount,
        locked_lp_amount: receipt.locked_lp_amount,
        open_time: receipt.open_time,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Pool {} created: liquidity {}, locked {}",
        pool_key,
        receipt.liquidity,
        receipt.locked_lp_amount
    );

    Ok(())
}
