use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::AmmError;
use crate::state::{AmmConfig, PoolState, PoolStatus};

/// Parameters of a new fee schedule
#[derive(Clone, Copy, Debug)]
pub struct FeeScheduleParams {
    pub index: u16,
    pub bump: u8,
    pub owner: Pubkey,
    pub trade_fee_rate: u64,
    pub protocol_fee_rate: u64,
    pub fund_fee_rate: u64,
    pub create_pool_fee: u64,
}

/// A single administrative change to a fee schedule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigUpdate {
    TradeFeeRate(u64),
    ProtocolFeeRate(u64),
    FundFeeRate(u64),
    CreatePoolFee(u64),
    DisableCreatePool(bool),
    LockedLpAmount(u64),
    ProtocolOwner(Pubkey),
    FundOwner(Pubkey),
}

impl ConfigUpdate {
    /// Decode the instruction's `(param, value)` pair. Owner changes carry the
    /// new owner separately.
    pub fn from_param(param: u8, value: u64, new_owner: Option<Pubkey>) -> Result<Self> {
        match param {
            0 => Ok(ConfigUpdate::TradeFeeRate(value)),
            1 => Ok(ConfigUpdate::ProtocolFeeRate(value)),
            2 => Ok(ConfigUpdate::FundFeeRate(value)),
            3 => Ok(ConfigUpdate::CreatePoolFee(value)),
            4 => Ok(ConfigUpdate::DisableCreatePool(value != 0)),
            5 => Ok(ConfigUpdate::LockedLpAmount(value)),
            6 => Ok(ConfigUpdate::ProtocolOwner(
                new_owner.ok_or(AmmError::InvalidInput)?,
            )),
            7 => Ok(ConfigUpdate::FundOwner(
                new_owner.ok_or(AmmError::InvalidInput)?,
            )),
            _ => err!(AmmError::InvalidInput),
        }
    }
}

/// Create the fee schedule record. Fee recipients start as the owner.
pub fn create_fee_schedule(config: &mut AmmConfig, params: FeeScheduleParams) -> Result<()> {
    require!(!config.is_initialized(), AmmError::DuplicateFeeSchedule);
    require!(
        validate_fee_rates(
            params.trade_fee_rate,
            params.protocol_fee_rate,
            params.fund_fee_rate
        ),
        AmmError::InvalidFeeParameters
    );

    config.version = PROTOCOL_VERSION;
    config.bump = params.bump;
    config.index = params.index;
    config.disable_create_pool = false;
    config.trade_fee_rate = params.trade_fee_rate;
    config.protocol_fee_rate = params.protocol_fee_rate;
    config.fund_fee_rate = params.fund_fee_rate;
    config.create_pool_fee = params.create_pool_fee;
    config.locked_lp_amount = DEFAULT_LOCKED_LP_AMOUNT;
    config.owner = params.owner;
    config.protocol_owner = params.owner;
    config.fund_owner = params.owner;

    Ok(())
}

/// Apply one change, keeping the rate invariants.
pub fn update_fee_schedule(config: &mut AmmConfig, update: ConfigUpdate) -> Result<()> {
    require!(config.is_initialized(), AmmError::InvalidInput);

    let (trade, protocol, fund) = match update {
        ConfigUpdate::TradeFeeRate(rate) => (rate, config.protocol_fee_rate, config.fund_fee_rate),
        ConfigUpdate::ProtocolFeeRate(rate) => (config.trade_fee_rate, rate, config.fund_fee_rate),
        ConfigUpdate::FundFeeRate(rate) => (config.trade_fee_rate, config.protocol_fee_rate, rate),
        _ => (config.trade_fee_rate, config.protocol_fee_rate, config.fund_fee_rate),
    };
    require!(
        validate_fee_rates(trade, protocol, fund),
        AmmError::InvalidFeeParameters
    );

    match update {
        ConfigUpdate::TradeFeeRate(_)
        | ConfigUpdate::ProtocolFeeRate(_)
        | ConfigUpdate::FundFeeRate(_) => {
            config.trade_fee_rate = trade;
            config.protocol_fee_rate = protocol;
            config.fund_fee_rate = fund;
        }
        ConfigUpdate::CreatePoolFee(fee) => config.create_pool_fee = fee,
        ConfigUpdate::DisableCreatePool(disabled) => config.disable_create_pool = disabled,
        ConfigUpdate::LockedLpAmount(amount) => config.locked_lp_amount = amount,
        ConfigUpdate::ProtocolOwner(owner) => config.protocol_owner = owner,
        ConfigUpdate::FundOwner(owner) => config.fund_owner = owner,
    }

    Ok(())
}

/// Open or close a created pool. Returns the previous status.
pub fn set_pool_status(pool: &mut PoolState, status: PoolStatus, now: i64) -> Result<PoolStatus> {
    require!(pool.is_initialized(), AmmError::PoolNotOpen);
    require!(status != PoolStatus::Uninitialized, AmmError::InvalidInput);

    let previous = pool.status;
    pool.status = status;
    pool.last_update_timestamp = now;

    Ok(previous)
}
