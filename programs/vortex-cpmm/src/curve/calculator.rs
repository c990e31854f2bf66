use anchor_lang::prelude::*;

use super::constant_product::ConstantProductCurve;
use super::fees::Fees;
use crate::errors::AmmError;

/// Rounding applied when converting LP tokens to trading tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundDirection {
    /// Round toward zero, used when the pool pays out
    Floor,
    /// Round away from zero, used when the pool is paid
    Ceiling,
}

/// Direction of a swap relative to the pool's canonical token order
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeDirection {
    /// Token 0 in, token 1 out
    ZeroForOne,
    /// Token 1 in, token 0 out
    OneForZero,
}

/// Token amounts backing a quantity of LP tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradingTokenResult {
    pub token_0_amount: u128,
    pub token_1_amount: u128,
}

/// Outcome of a swap against the curve, fees included
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    /// Input-side reserve after the whole input is added
    pub new_swap_source_amount: u128,
    /// Output-side reserve after the output is removed
    pub new_swap_destination_amount: u128,
    /// Gross amount paid in, trade fee included
    pub source_amount_swapped: u128,
    /// Amount paid out
    pub destination_amount_swapped: u128,
    pub trade_fee: u128,
    pub protocol_fee: u128,
    pub fund_fee: u128,
}

pub struct CurveCalculator;

impl CurveCalculator {
    /// Both reserves must be non-zero for the curve to be defined.
    pub fn validate_supply(token_0_amount: u64, token_1_amount: u64) -> Result<()> {
        require!(token_0_amount > 0, AmmError::InsufficientLiquidity);
        require!(token_1_amount > 0, AmmError::InsufficientLiquidity);
        Ok(())
    }

    /// Swap an exact input. The trade fee comes off the input before the curve
    /// is applied; protocol and fund fees are carved out of the trade fee.
    pub fn swap_base_input(
        source_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
    ) -> Result<SwapResult> {
        let trade_fee = Fees::trading_fee(source_amount, trade_fee_rate)?;
        let source_amount_less_fees = source_amount
            .checked_sub(trade_fee)
            .ok_or(AmmError::MathOverflow)?;

        let destination_amount_swapped = ConstantProductCurve::swap_base_input_without_fees(
            source_amount_less_fees,
            swap_source_amount,
            swap_destination_amount,
        )?;

        Self::finish(
            source_amount,
            destination_amount_swapped,
            swap_source_amount,
            swap_destination_amount,
            trade_fee,
            protocol_fee_rate,
            fund_fee_rate,
        )
    }

    /// Swap for an exact output. The curve gives the fee-free input, which is
    /// then grossed up so the trade fee comes on top.
    pub fn swap_base_output(
        destination_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
    ) -> Result<SwapResult> {
        let source_amount_swapped = ConstantProductCurve::swap_base_output_without_fees(
            destination_amount,
            swap_source_amount,
            swap_destination_amount,
        )?;

        let source_amount =
            Fees::calculate_pre_fee_amount(source_amount_swapped, trade_fee_rate)?;
        let trade_fee = source_amount
            .checked_sub(source_amount_swapped)
            .ok_or(AmmError::MathOverflow)?;

        Self::finish(
            source_amount,
            destination_amount,
            swap_source_amount,
            swap_destination_amount,
            trade_fee,
            protocol_fee_rate,
            fund_fee_rate,
        )
    }

    fn finish(
        source_amount: u128,
        destination_amount_swapped: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        trade_fee: u128,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
    ) -> Result<SwapResult> {
        require!(
            destination_amount_swapped < swap_destination_amount,
            AmmError::InsufficientLiquidity
        );
        let protocol_fee = Fees::protocol_fee(trade_fee, protocol_fee_rate)?;
        let fund_fee = Fees::fund_fee(trade_fee, fund_fee_rate)?;

        Ok(SwapResult {
            new_swap_source_amount: swap_source_amount
                .checked_add(source_amount)
                .ok_or(AmmError::MathOverflow)?,
            new_swap_destination_amount: swap_destination_amount - destination_amount_swapped,
            source_amount_swapped: source_amount,
            destination_amount_swapped,
            trade_fee,
            protocol_fee,
            fund_fee,
        })
    }

    /// Fee-free invariant check: the curve alone, with the trade fee removed
    /// from the new source reserve, must not have lost value.
    pub fn verify_invariant(
        swap_source_amount: u128,
        swap_destination_amount: u128,
        result: &SwapResult,
    ) -> Result<()> {
        let constant_before = swap_source_amount
            .checked_mul(swap_destination_amount)
            .ok_or(AmmError::MathOverflow)?;
        let constant_after = result
            .new_swap_source_amount
            .checked_sub(result.trade_fee)
            .ok_or(AmmError::MathOverflow)?
            .checked_mul(result.new_swap_destination_amount)
            .ok_or(AmmError::MathOverflow)?;

        require!(constant_after >= constant_before, AmmError::InvariantViolation);

        Ok(())
    }

    /// Amounts a depositor pays for `lp_token_amount`, rounded up so existing
    /// holders are never diluted.
    pub fn liquidity_for_deposit(
        lp_token_amount: u128,
        token_0_vault_amount: u128,
        token_1_vault_amount: u128,
        lp_token_supply: u128,
    ) -> Result<TradingTokenResult> {
        Self::lp_tokens_to_trading_tokens(
            lp_token_amount,
            lp_token_supply,
            token_0_vault_amount,
            token_1_vault_amount,
            RoundDirection::Ceiling,
        )
    }

    /// Amounts paid out for burning `lp_token_amount`, rounded down.
    pub fn amounts_for_withdraw(
        lp_token_amount: u128,
        token_0_vault_amount: u128,
        token_1_vault_amount: u128,
        lp_token_supply: u128,
    ) -> Result<TradingTokenResult> {
        Self::lp_tokens_to_trading_tokens(
            lp_token_amount,
            lp_token_supply,
            token_0_vault_amount,
            token_1_vault_amount,
            RoundDirection::Floor,
        )
    }

    pub fn lp_tokens_to_trading_tokens(
        lp_token_amount: u128,
        lp_token_supply: u128,
        token_0_vault_amount: u128,
        token_1_vault_amount: u128,
        round_direction: RoundDirection,
    ) -> Result<TradingTokenResult> {
        ConstantProductCurve::lp_tokens_to_trading_tokens(
            lp_token_amount,
            lp_token_supply,
            token_0_vault_amount,
            token_1_vault_amount,
            round_direction,
        )
    }
}
