use anchor_lang::prelude::*;

use crate::engine::{update_fee_schedule, ConfigUpdate};
use crate::errors::AmmError;
use crate::events::FeeScheduleUpdated;
use crate::state::AmmConfig;

#[derive(Accounts)]
pub struct UpdateAmmConfig<'info> {
    /// Config owner or program admin
    #[account(
        constraint = amm_config.is_authority(&owner.key()) @ AmmError::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Fee schedule account
    #[account(mut)]
    pub amm_config: Box<Account<'info, AmmConfig>>,
}

/// `param` selects the field: 0 trade fee rate, 1 protocol fee rate,
/// 2 fund fee rate, 3 create pool fee, 4 disable create pool,
/// 5 locked LP amount, 6 protocol owner, 7 fund owner. Owner changes take
/// the new owner from the first remaining account.
pub fn handler(ctx: Context<UpdateAmmConfig>, param: u8, value: u64) -> Result<()> {
    let new_owner = ctx.remaining_accounts.first().map(|account| account.key());
    let update = ConfigUpdate::from_param(param, value, new_owner)?;

    let amm_config = &mut ctx.accounts.amm_config;
    update_fee_schedule(amm_config, update)?;

    emit!(FeeScheduleUpdated {
        amm_config: amm_config.key(),
        param,
        value,
        trade_fee_rate: amm_config.trade_fee_rate,
        protocol_fee_rate: amm_config.protocol_fee_rate,
        fund_fee_rate: amm_config.fund_fee_rate,
        disable_create_pool: amm_config.disable_create_pool,
    });

    msg!("Fee schedule {} updated: {:?}", amm_config.index, update);

    Ok(())
}
