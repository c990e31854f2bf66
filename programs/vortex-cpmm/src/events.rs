use anchor_lang::prelude::*;

/// Emitted when a fee schedule is created
#[event]
pub struct FeeScheduleCreated {
    pub amm_config: Pubkey,
    pub index: u16,
    pub trade_fee_rate: u64,
    pub protocol_fee_rate: u64,
    pub fund_fee_rate: u64,
    pub create_pool_fee: u64,
    pub owner: Pubkey,
}

/// Emitted when one fee schedule parameter changes
#[event]
pub struct FeeScheduleUpdated {
    pub amm_config: Pubkey,
    pub param: u8,
    pub value: u64,
    pub trade_fee_rate: u64,
    pub protocol_fee_rate: u64,
    pub fund_fee_rate: u64,
    pub disable_create_pool: bool,
}

/// Emitted when a pool is opened or closed
#[event]
pub struct PoolStatusUpdated {
    pub pool: Pubkey,
    pub previous_status: u8,
    pub status: u8,
    pub timestamp: i64,
}

/// Emitted when a new pool is created
#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub amm_config: Pubkey,
    pub creator: Pubkey,
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub init_amount_0: u64,
    pub init_amount_1: u64,
    pub lp_amount: u64,
    pub locked_lp_amount: u64,
    pub open_time: u64,
    pub timestamp: i64,
}

/// Emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount_0: u64,
    pub amount_1: u64,
    pub lp_minted: u64,
    pub reserve_0: u64,
    pub reserve_1: u64,
    pub lp_supply: u64,
    pub timestamp: i64,
}

/// Emitted when liquidity is removed
#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub lp_burned: u64,
    pub amount_0: u64,
    pub amount_1: u64,
    pub reserve_0: u64,
    pub reserve_1: u64,
    pub lp_supply: u64,
    pub timestamp: i64,
}

/// Emitted when a swap occurs
#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub token_in: Pubkey,
    pub token_out: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub trade_fee: u64,
    pub protocol_fee: u64,
    pub fund_fee: u64,
    /// True for an exact-input swap
    pub base_input: bool,
    pub reserve_0: u64,
    pub reserve_1: u64,
    pub timestamp: i64,
}

/// Emitted when owed protocol or fund fees are paid out
#[event]
pub struct FeesCollected {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub is_protocol: bool,
    pub amount_0: u64,
    pub amount_1: u64,
    pub timestamp: i64,
}
