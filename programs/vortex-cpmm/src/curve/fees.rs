//! Fee arithmetic. Rates are parts-per-million of the amount they apply to.

use anchor_lang::prelude::*;

use crate::constants::FEE_RATE_DENOMINATOR_VALUE;
use crate::errors::AmmError;

/// `ceil(token_amount * fee_numerator / fee_denominator)`
pub fn ceil_div(token_amount: u128, fee_numerator: u128, fee_denominator: u128) -> Result<u128> {
    require!(fee_denominator > 0, AmmError::MathOverflow);
    let product = token_amount
        .checked_mul(fee_numerator)
        .ok_or(AmmError::MathOverflow)?;
    let quotient = product / fee_denominator;
    if product % fee_denominator == 0 {
        Ok(quotient)
    } else {
        quotient.checked_add(1).ok_or(error!(AmmError::MathOverflow))
    }
}

/// `floor(token_amount * fee_numerator / fee_denominator)`
pub fn floor_div(token_amount: u128, fee_numerator: u128, fee_denominator: u128) -> Result<u128> {
    require!(fee_denominator > 0, AmmError::MathOverflow);
    Ok(token_amount
        .checked_mul(fee_numerator)
        .ok_or(AmmError::MathOverflow)?
        / fee_denominator)
}

pub struct Fees;

impl Fees {
    /// Trade fee charged on a swap input, rounded up.
    pub fn trading_fee(amount: u128, trade_fee_rate: u64) -> Result<u128> {
        ceil_div(
            amount,
            u128::from(trade_fee_rate),
            u128::from(FEE_RATE_DENOMINATOR_VALUE),
        )
    }

    /// Protocol share of a trade fee, rounded down.
    pub fn protocol_fee(trade_fee: u128, protocol_fee_rate: u64) -> Result<u128> {
        floor_div(
            trade_fee,
            u128::from(protocol_fee_rate),
            u128::from(FEE_RATE_DENOMINATOR_VALUE),
        )
    }

    /// Fund share of a trade fee, rounded down.
    pub fn fund_fee(trade_fee: u128, fund_fee_rate: u64) -> Result<u128> {
        floor_div(
            trade_fee,
            u128::from(fund_fee_rate),
            u128::from(FEE_RATE_DENOMINATOR_VALUE),
        )
    }

    /// Smallest gross amount whose post-fee remainder covers `post_fee_amount`.
    pub fn calculate_pre_fee_amount(post_fee_amount: u128, trade_fee_rate: u64) -> Result<u128> {
        if trade_fee_rate == 0 {
            return Ok(post_fee_amount);
        }
        require!(
            trade_fee_rate < FEE_RATE_DENOMINATOR_VALUE,
            AmmError::InvalidFeeParameters
        );
        ceil_div(
            post_fee_amount,
            u128::from(FEE_RATE_DENOMINATOR_VALUE),
            u128::from(FEE_RATE_DENOMINATOR_VALUE - trade_fee_rate),
        )
    }
}
