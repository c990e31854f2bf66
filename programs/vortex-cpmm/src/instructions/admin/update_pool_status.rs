use anchor_lang::prelude::*;

use crate::constants::POOL_SEED;
use crate::engine::set_pool_status;
use crate::errors::AmmError;
use crate::events::PoolStatusUpdated;
use crate::state::{AmmConfig, PoolState, PoolStatus};

#[derive(Accounts)]
pub struct UpdatePoolStatus<'info> {
    /// Config owner or program admin
    #[account(
        constraint = amm_config.is_authority(&authority.key()) @ AmmError::InvalidOwner
    )]
    pub authority: Signer<'info>,

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
}

pub fn handler(ctx: Context<UpdatePoolStatus>, status: u8) -> Result<()> {
    let status = PoolStatus::try_from(status)?;
    let clock = Clock::get()?;
    let pool_state = &mut ctx.accounts.pool_state;

    let previous = set_pool_status(pool_state, status, clock.unix_timestamp)?;

    emit!(PoolStatusUpdated {
        pool: pool_state.key(),
        previous_status: previous as u8,
        status: status as u8,
        timestamp: clock.unix_timestamp,
    });

    msg!("Pool {} status {:?} -> {:?}", pool_state.key(), previous, status);

    Ok(())
}
