#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod curve;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use engine::FeeRecipient;
#[allow(ambiguous_glob_reexports)]
pub use instructions::*;

declare_id!("EUPaiQG4udduXyjUvF874Z4RqLAjdB3tQ7XSJ3jSMXKP");

/// Program admin, allowed to create fee schedules and administer every pool
pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("5Aqovp9irZVxGtByCUo4sfAtwu1rD3RzAjyZi2rEQXyL");
}

#[program]
pub mod vortex_cpmm {
    use super::*;

    /// Create a fee schedule at `index`
    pub fn create_amm_config(
        ctx: Context<CreateAmmConfig>,
        index: u16,
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
        create_pool_fee: u64,
    ) -> Result<()> {
        instructions::admin::create_amm_config::handler(
            ctx,
            index,
            trade_fee_rate,
            protocol_fee_rate,
            fund_fee_rate,
            create_pool_fee,
        )
    }

    /// Change one fee schedule parameter
    pub fn update_amm_config(ctx: Context<UpdateAmmConfig>, param: u8, value: u64) -> Result<()> {
        instructions::admin::update_amm_config::handler(ctx, param, value)
    }

    /// Open (1) or close (2) a pool
    pub fn update_pool_status(ctx: Context<UpdatePoolStatus>, status: u8) -> Result<()> {
        instructions::admin::update_pool_status::handler(ctx, status)
    }

    /// Pay out token fees owed to the protocol
    pub fn collect_protocol_fee(
        ctx: Context<CollectFee>,
        amount_0_requested: u64,
        amount_1_requested: u64,
    ) -> Result<()> {
        instructions::admin::collect_fee::handler(
            ctx,
            FeeRecipient::Protocol,
            amount_0_requested,
            amount_1_requested,
        )
    }

    /// Pay out token fees owed to the fund
    pub fn collect_fund_fee(
        ctx: Context<CollectFee>,
        amount_0_requested: u64,
        amount_1_requested: u64,
    ) -> Result<()> {
        instructions::admin::collect_fee::handler(
            ctx,
            FeeRecipient::Fund,
            amount_0_requested,
            amount_1_requested,
        )
    }

    /// Create a pool and seed it with both tokens
    pub fn initialize(
        ctx: Context<Initialize>,
        init_amount_0: u64,
        init_amount_1: u64,
        open_time: u64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, init_amount_0, init_amount_1, open_time)
    }

    /// Mint exactly `lp_token_amount` LP tokens
    pub fn deposit(
        ctx: Context<Deposit>,
        lp_token_amount: u64,
        maximum_token_0_amount: u64,
        maximum_token_1_amount: u64,
    ) -> Result<()> {
        instructions::deposit::handler(
            ctx,
            lp_token_amount,
            maximum_token_0_amount,
            maximum_token_1_amount,
        )
    }

    /// Burn `lp_token_amount` LP tokens
    pub fn withdraw(
        ctx: Context<Withdraw>,
        lp_token_amount: u64,
        minimum_token_0_amount: u64,
        minimum_token_1_amount: u64,
    ) -> Result<()> {
        instructions::withdraw::handler(
            ctx,
            lp_token_amount,
            minimum_token_0_amount,
            minimum_token_1_amount,
        )
    }

    /// Swap exactly `amount_in` for at least `minimum_amount_out`
    pub fn swap_base_input(ctx: Context<Swap>, amount_in: u64, minimum_amount_out: u64) -> Result<()> {
        instructions::swap_base_input::handler(ctx, amount_in, minimum_amount_out)
    }

    /// Swap at most `max_amount_in` for exactly `amount_out`
    pub fn swap_base_output(ctx: Context<Swap>, amount_out: u64, max_amount_in: u64) -> Result<()> {
        instructions::swap_base_output::handler(ctx, amount_out, max_amount_in)
    }
}

#[cfg(test)]
mod tests {
    use anchor_lang::InstructionData;

    fn u64_at(data: &[u8], offset: usize) -> u64 {
        u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
    }

    #[test]
    fn swap_base_output_takes_amount_out_first() {
        let data = crate::instruction::SwapBaseOutput {
            amount_out: 100,
            max_amount_in: 110,
        }
        .data();

        assert_eq!(data.len(), 8 + 16);
        assert_eq!(u64_at(&data, 8), 100);
        assert_eq!(u64_at(&data, 16), 110);
    }

    #[test]
    fn swap_base_input_takes_amount_in_first() {
        let data = crate::instruction::SwapBaseInput {
            amount_in: 100,
            minimum_amount_out: 90,
        }
        .data();

        assert_eq!(u64_at(&data, 8), 100);
        assert_eq!(u64_at(&data, 16), 90);
    }
}
