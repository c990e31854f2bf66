use anchor_lang::prelude::*;

use super::swap_base_input::Swap;
use crate::engine;

pub fn handler(ctx: Context<Swap>, amount_out: u64, max_amount_in: u64) -> Result<()> {
    ctx.accounts.validate_route()?;
    let clock = Clock::get()?;
    let input_mint = ctx.accounts.input_token_mint.key();

    let receipt = {
        let mut observation_state = ctx.accounts.observation_state.load_mut()?;
        engine::swap_base_output(
            &mut ctx.accounts.pool_state,
            &ctx.accounts.amm_config,
            &mut observation_state,
            &input_mint,
            amount_out,
            max_amount_in,
            clock.unix_timestamp,
        )?
    };

    ctx.accounts.settle(&receipt, false, clock.unix_timestamp)
}
