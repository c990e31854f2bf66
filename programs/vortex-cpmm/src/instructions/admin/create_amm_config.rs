use anchor_lang::prelude::*;

use crate::constants::*;
use crate::engine::{create_fee_schedule, FeeScheduleParams};
use crate::errors::AmmError;
use crate::events::FeeScheduleCreated;
use crate::state::AmmConfig;

#[derive(Accounts)]
#[instruction(index: u16)]
pub struct CreateAmmConfig<'info> {
    /// Program admin
    #[account(
        mut,
        address = crate::admin::ID @ AmmError::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Fee schedule account
    #[account(
        init,
        seeds = [AMM_CONFIG_SEED, &index.to_be_bytes()],
        bump,
        payer = owner,
        space = DISCRIMINATOR + AmmConfig::INIT_SPACE
    )]
    pub amm_config: Box<Account<'info, AmmConfig>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateAmmConfig>,
    index: u16,
    trade_fee_rate: u64,
    protocol_fee_rate: u64,
    fund_fee_rate: u64,
    create_pool_fee: u64,
) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let amm_config = &mut ctx.accounts.amm_config;

    create_fee_schedule(
        amm_config,
        FeeScheduleParams {
            index,
            bump: ctx.bumps.amm_config,
            owner,
            trade_fee_rate,
            protocol_fee_rate,
            fund_fee_rate,
            create_pool_fee,
        },
    )?;

    emit!(FeeScheduleCreated {
        amm_config: amm_config.key(),
        index,
        trade_fee_rate,
        protocol_fee_rate,
        fund_fee_rate,
        create_pool_fee,
        owner,
    });

    msg!("Fee schedule {} created: {}", index, amm_config.key());

    Ok(())
}
