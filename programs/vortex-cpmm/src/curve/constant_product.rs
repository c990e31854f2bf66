//! The constant product invariant `x * y = k`, fee-free.
//!
//! Amounts are `u64` on chain; every product here is formed in `u128` so a
//! product of two `u64` values can never overflow, and anything wider is a
//! `MathOverflow` rather than a wrap.

use anchor_lang::prelude::*;

use super::calculator::{RoundDirection, TradingTokenResult};
use crate::errors::AmmError;

/// Integer square root, Babylonian method
pub fn integer_sqrt(y: u128) -> u128 {
    if y == 0 {
        return 0;
    }

    // (y + 1) / 2 without overflowing at u128::MAX
    let mut z = y / 2 + y % 2;
    let mut x = y;

    while z < x {
        x = z;
        z = (y / z + z) / 2;
    }

    x
}

pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// Output for a fee-free input, rounded down:
    /// `out = in * R_out / (R_in + in)`
    pub fn swap_base_input_without_fees(
        input_amount: u128,
        input_vault_amount: u128,
        output_vault_amount: u128,
    ) -> Result<u128> {
        let numerator = input_amount
            .checked_mul(output_vault_amount)
            .ok_or(AmmError::MathOverflow)?;
        let denominator = input_vault_amount
            .checked_add(input_amount)
            .ok_or(AmmError::MathOverflow)?;
        require!(denominator > 0, AmmError::InsufficientLiquidity);

        Ok(numerator / denominator)
    }

    /// Fee-free input required for an exact output, rounded up:
    /// `in = R_in * out / (R_out - out)`
    pub fn swap_base_output_without_fees(
        output_amount: u128,
        input_vault_amount: u128,
        output_vault_amount: u128,
    ) -> Result<u128> {
        require!(
            output_amount < output_vault_amount,
            AmmError::InsufficientLiquidity
        );
        let numerator = input_vault_amount
            .checked_mul(output_amount)
            .ok_or(AmmError::MathOverflow)?;
        let denominator = output_vault_amount - output_amount;

        let quotient = numerator / denominator;
        if numerator % denominator == 0 {
            Ok(quotient)
        } else {
            quotient
                .checked_add(1)
                .ok_or(error!(AmmError::MathOverflow))
        }
    }

    /// Liquidity minted for the first deposit: `sqrt(amount_0 * amount_1)`
    pub fn initial_liquidity(amount_0: u128, amount_1: u128) -> Result<u128> {
        require!(amount_0 > 0 && amount_1 > 0, AmmError::InvalidAmount);
        let product = amount_0
            .checked_mul(amount_1)
            .ok_or(AmmError::MathOverflow)?;

        Ok(integer_sqrt(product))
    }

    /// Proportional share of both reserves for `lp_token_amount`.
    ///
    /// `Ceiling` is used when the caller pays in (deposit), `Floor` when the
    /// caller is paid out (withdraw).
    pub fn lp_tokens_to_trading_tokens(
        lp_token_amount: u128,
        lp_token_supply: u128,
        token_0_vault_amount: u128,
        token_1_vault_amount: u128,
        round_direction: RoundDirection,
    ) -> Result<TradingTokenResult> {
        require!(lp_token_supply > 0, AmmError::InsufficientLiquidity);

        let share = |vault_amount: u128| -> Result<u128> {
            let product = lp_token_amount
                .checked_mul(vault_amount)
                .ok_or(AmmError::MathOverflow)?;
            let quotient = product / lp_token_supply;
            match round_direction {
                RoundDirection::Floor => Ok(quotient),
                RoundDirection::Ceiling if product % lp_token_supply != 0 => quotient
                    .checked_add(1)
                    .ok_or(error!(AmmError::MathOverflow)),
                RoundDirection::Ceiling => Ok(quotient),
            }
        };

        Ok(TradingTokenResult {
            token_0_amount: share(token_0_vault_amount)?,
            token_1_amount: share(token_1_vault_amount)?,
        })
    }
}
