use anchor_lang::prelude::*;

use super::{PoolSnapshot, Settlement, TransferFlow};
use crate::curve::{CurveCalculator, SwapResult, TradeDirection};
use crate::errors::AmmError;
use crate::state::{AmmConfig, ObservationState, PoolState, TokenSide};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapReceipt {
    pub direction: TradeDirection,
    pub input_side: TokenSide,
    pub output_side: TokenSide,
    /// Gross amount paid in, trade fee included
    pub amount_in: u64,
    pub amount_out: u64,
    pub trade_fee: u64,
    pub protocol_fee: u64,
    pub fund_fee: u64,
    pub snapshot: PoolSnapshot,
    pub settlement: Settlement,
}

#[derive(Clone, Copy, Debug)]
enum SwapKind {
    BaseInput {
        amount_in: u64,
        minimum_amount_out: u64,
    },
    BaseOutput {
        amount_out: u64,
        maximum_amount_in: u64,
    },
}

/// Sell exactly `amount_in` of `input_mint` for at least `minimum_amount_out`.
pub fn swap_base_input(
    pool: &mut PoolState,
    config: &AmmConfig,
    observation: &mut ObservationState,
    input_mint: &Pubkey,
    amount_in: u64,
    minimum_amount_out: u64,
    now: i64,
) -> Result<SwapReceipt> {
    execute(
        pool,
        config,
        observation,
        input_mint,
        SwapKind::BaseInput {
            amount_in,
            minimum_amount_out,
        },
        now,
    )
}

/// Buy exactly `amount_out` of the other token, paying at most
/// `maximum_amount_in` of `input_mint`.
pub fn swap_base_output(
    pool: &mut PoolState,
    config: &AmmConfig,
    observation: &mut ObservationState,
    input_mint: &Pubkey,
    amount_out: u64,
    maximum_amount_in: u64,
    now: i64,
) -> Result<SwapReceipt> {
    execute(
        pool,
        config,
        observation,
        input_mint,
        SwapKind::BaseOutput {
            amount_out,
            maximum_amount_in,
        },
        now,
    )
}

fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(AmmError::MathOverflow))
}

fn quote(
    kind: SwapKind,
    config: &AmmConfig,
    reserve_in: u64,
    reserve_out: u64,
) -> Result<SwapResult> {
    match kind {
        SwapKind::BaseInput { amount_in, .. } => {
            require!(amount_in > 0, AmmError::InvalidAmount);
            CurveCalculator::swap_base_input(
                u128::from(amount_in),
                u128::from(reserve_in),
                u128::from(reserve_out),
                config.trade_fee_rate,
                config.protocol_fee_rate,
                config.fund_fee_rate,
            )
        }
        SwapKind::BaseOutput { amount_out, .. } => {
            require!(amount_out > 0, AmmError::InvalidAmount);
            require!(amount_out < reserve_out, AmmError::InsufficientLiquidity);
            CurveCalculator::swap_base_output(
                u128::from(amount_out),
                u128::from(reserve_in),
                u128::from(reserve_out),
                config.trade_fee_rate,
                config.protocol_fee_rate,
                config.fund_fee_rate,
            )
        }
    }
}

fn execute(
    pool: &mut PoolState,
    config: &AmmConfig,
    observation: &mut ObservationState,
    input_mint: &Pubkey,
    kind: SwapKind,
    now: i64,
) -> Result<SwapReceipt> {
    let block_timestamp = u64::try_from(now).map_err(|_| error!(AmmError::InvalidInput))?;
    require!(config.has_valid_rates(), AmmError::InvalidFeeParameters);
    require!(
        pool.is_open() && block_timestamp >= pool.open_time,
        AmmError::PoolNotOpen
    );

    let direction = pool.trade_direction(input_mint)?;
    let (input_side, output_side) = match direction {
        TradeDirection::ZeroForOne => (TokenSide::Token0, TokenSide::Token1),
        TradeDirection::OneForZero => (TokenSide::Token1, TokenSide::Token0),
    };

    let (reserve_0, reserve_1) = pool.vault_amount_without_fee()?;
    let (reserve_in, reserve_out) = match direction {
        TradeDirection::ZeroForOne => (reserve_0, reserve_1),
        TradeDirection::OneForZero => (reserve_1, reserve_0),
    };

    let result = quote(kind, config, reserve_in, reserve_out)?;
    CurveCalculator::verify_invariant(u128::from(reserve_in), u128::from(reserve_out), &result)?;

    let amount_in = to_u64(result.source_amount_swapped)?;
    let amount_out = to_u64(result.destination_amount_swapped)?;
    let trade_fee = to_u64(result.trade_fee)?;
    let protocol_fee = to_u64(result.protocol_fee)?;
    let fund_fee = to_u64(result.fund_fee)?;
    require!(
        amount_in > 0 && amount_out > 0,
        AmmError::ZeroTradingTokens
    );

    let within_slippage = match kind {
        SwapKind::BaseInput {
            minimum_amount_out, ..
        } => amount_out >= minimum_amount_out,
        SwapKind::BaseOutput {
            maximum_amount_in, ..
        } => amount_in <= maximum_amount_in,
    };
    require!(within_slippage, AmmError::SlippageExceeded);

    let (vault_in, vault_out, protocol_fees_in, fund_fees_in) = match input_side {
        TokenSide::Token0 => (
            pool.vault_0_amount,
            pool.vault_1_amount,
            pool.protocol_fees_token_0,
            pool.fund_fees_token_0,
        ),
        TokenSide::Token1 => (
            pool.vault_1_amount,
            pool.vault_0_amount,
            pool.protocol_fees_token_1,
            pool.fund_fees_token_1,
        ),
    };
    let vault_in = vault_in
        .checked_add(amount_in)
        .ok_or(AmmError::MathOverflow)?;
    let vault_out = vault_out
        .checked_sub(amount_out)
        .ok_or(AmmError::InsufficientLiquidity)?;
    let protocol_fees_in = protocol_fees_in
        .checked_add(protocol_fee)
        .ok_or(AmmError::MathOverflow)?;
    let fund_fees_in = fund_fees_in
        .checked_add(fund_fee)
        .ok_or(AmmError::MathOverflow)?;

    // prices that held up to this swap
    let (token_0_price_x32, token_1_price_x32) = PoolState::token_price_x32(reserve_0, reserve_1);
    observation.update(block_timestamp, token_0_price_x32, token_1_price_x32)?;

    let (volume_0, volume_1) = match input_side {
        TokenSide::Token0 => {
            pool.vault_0_amount = vault_in;
            pool.vault_1_amount = vault_out;
            pool.protocol_fees_token_0 = protocol_fees_in;
            pool.fund_fees_token_0 = fund_fees_in;
            (amount_in, amount_out)
        }
        TokenSide::Token1 => {
            pool.vault_1_amount = vault_in;
            pool.vault_0_amount = vault_out;
            pool.protocol_fees_token_1 = protocol_fees_in;
            pool.fund_fees_token_1 = fund_fees_in;
            (amount_out, amount_in)
        }
    };
    pool.record_swap(volume_0, volume_1, now);

    let mut settlement = Settlement::default();
    settlement.push(input_side, TransferFlow::UserToVault, amount_in);
    settlement.push(output_side, TransferFlow::VaultToUser, amount_out);

    Ok(SwapReceipt {
        direction,
        input_side,
        output_side,
        amount_in,
        amount_out,
        trade_fee,
        protocol_fee,
        fund_fee,
        snapshot: PoolSnapshot::of(pool)?,
        settlement,
    })
}
