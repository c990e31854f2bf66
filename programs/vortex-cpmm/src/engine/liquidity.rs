use anchor_lang::prelude::*;

use super::{PoolSnapshot, Settlement, TransferFlow};
use crate::constants::PROTOCOL_VERSION;
use crate::curve::{ConstantProductCurve, CurveCalculator};
use crate::errors::AmmError;
use crate::state::{AmmConfig, PoolState, PoolStatus, TokenSide};

/// Addresses and decimals a new pool is bound to
#[derive(Clone, Copy, Debug, Default)]
pub struct PoolKeys {
    pub bump: u8,
    pub auth_bump: u8,
    pub amm_config: Pubkey,
    pub pool_creator: Pubkey,
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub token_0_program: Pubkey,
    pub token_1_program: Pubkey,
    pub lp_mint: Pubkey,
    pub observation_key: Pubkey,
    pub mint_0_decimals: u8,
    pub mint_1_decimals: u8,
    pub lp_mint_decimals: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitializeReceipt {
    /// Liquidity defined by the seed amounts, locked part included
    pub liquidity: u64,
    /// LP tokens minted to the creator
    pub lp_amount: u64,
    pub locked_lp_amount: u64,
    pub open_time: u64,
    pub snapshot: PoolSnapshot,
    pub settlement: Settlement,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiquidityReceipt {
    pub token_0_amount: u64,
    pub token_1_amount: u64,
    pub lp_amount: u64,
    pub snapshot: PoolSnapshot,
    pub settlement: Settlement,
}

fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(AmmError::MathOverflow))
}

/// Create a pool from two seed amounts.
///
/// Liquidity is `sqrt(amount_0 * amount_1)`; the fee schedule's locked amount
/// is counted in the supply but minted to nobody, so the pool can never be
/// withdrawn down to an empty reserve.
pub fn initialize(
    pool: &mut PoolState,
    config: &AmmConfig,
    keys: PoolKeys,
    init_amount_0: u64,
    init_amount_1: u64,
    open_time: u64,
    now: i64,
) -> Result<InitializeReceipt> {
    require!(!pool.is_initialized(), AmmError::DuplicatePool);
    require!(config.is_initialized(), AmmError::InvalidInput);
    require!(!config.disable_create_pool, AmmError::NotApproved);
    require!(
        keys.token_0_mint < keys.token_1_mint,
        AmmError::InvalidMintOrder
    );
    require!(
        init_amount_0 > 0 && init_amount_1 > 0,
        AmmError::InvalidAmount
    );
    CurveCalculator::validate_supply(init_amount_0, init_amount_1)?;

    let liquidity = to_u64(ConstantProductCurve::initial_liquidity(
        u128::from(init_amount_0),
        u128::from(init_amount_1),
    )?)?;
    let locked_lp_amount = config.locked_lp_amount;
    let lp_amount = liquidity
        .checked_sub(locked_lp_amount)
        .filter(|amount| *amount > 0)
        .ok_or(AmmError::InsufficientLiquidity)?;

    let now_secs = u64::try_from(now).map_err(|_| error!(AmmError::InvalidInput))?;
    let open_time = if open_time <= now_secs {
        now_secs.checked_add(1).ok_or(AmmError::MathOverflow)?
    } else {
        open_time
    };

    pool.version = PROTOCOL_VERSION;
    pool.bump = keys.bump;
    pool.auth_bump = keys.auth_bump;
    pool.amm_config = keys.amm_config;
    pool.pool_creator = keys.pool_creator;
    pool.token_0_vault = keys.token_0_vault;
    pool.token_1_vault = keys.token_1_vault;
    pool.lp_mint = keys.lp_mint;
    pool.token_0_mint = keys.token_0_mint;
    pool.token_1_mint = keys.token_1_mint;
    pool.token_0_program = keys.token_0_program;
    pool.token_1_program = keys.token_1_program;
    pool.observation_key = keys.observation_key;
    pool.lp_mint_decimals = keys.lp_mint_decimals;
    pool.mint_0_decimals = keys.mint_0_decimals;
    pool.mint_1_decimals = keys.mint_1_decimals;

    pool.status = PoolStatus::Open;
    pool.lp_supply = liquidity;
    pool.locked_lp_amount = locked_lp_amount;
    pool.vault_0_amount = init_amount_0;
    pool.vault_1_amount = init_amount_1;
    pool.protocol_fees_token_0 = 0;
    pool.protocol_fees_token_1 = 0;
    pool.fund_fees_token_0 = 0;
    pool.fund_fees_token_1 = 0;
    pool.open_time = open_time;
    pool.created_at = now;
    pool.last_update_timestamp = now;

    let mut settlement = Settlement {
        lp_mint: lp_amount,
        lamports_fee: config.create_pool_fee,
        ..Default::default()
    };
    settlement.push(TokenSide::Token0, TransferFlow::UserToVault, init_amount_0);
    settlement.push(TokenSide::Token1, TransferFlow::UserToVault, init_amount_1);

    Ok(InitializeReceipt {
        liquidity,
        lp_amount,
        locked_lp_amount,
        open_time,
        snapshot: PoolSnapshot::of(pool)?,
        settlement,
    })
}

/// Mint exactly `lp_token_amount`, charging the proportional share of both
/// reserves rounded up.
pub fn deposit(
    pool: &mut PoolState,
    lp_token_amount: u64,
    maximum_token_0_amount: u64,
    maximum_token_1_amount: u64,
    now: i64,
) -> Result<LiquidityReceipt> {
    require!(pool.is_open(), AmmError::PoolNotOpen);
    require!(lp_token_amount > 0, AmmError::InvalidAmount);
    require!(
        pool.lp_supply > pool.locked_lp_amount,
        AmmError::InsufficientLiquidity
    );

    let (reserve_0, reserve_1) = pool.vault_amount_without_fee()?;
    let result = CurveCalculator::liquidity_for_deposit(
        u128::from(lp_token_amount),
        u128::from(reserve_0),
        u128::from(reserve_1),
        u128::from(pool.lp_supply),
    )?;
    let token_0_amount = to_u64(result.token_0_amount)?;
    let token_1_amount = to_u64(result.token_1_amount)?;
    require!(
        token_0_amount > 0 && token_1_amount > 0,
        AmmError::ZeroTradingTokens
    );

    require!(
        token_0_amount <= maximum_token_0_amount && token_1_amount <= maximum_token_1_amount,
        AmmError::SlippageExceeded
    );

    let vault_0_amount = pool
        .vault_0_amount
        .checked_add(token_0_amount)
        .ok_or(AmmError::MathOverflow)?;
    let vault_1_amount = pool
        .vault_1_amount
        .checked_add(token_1_amount)
        .ok_or(AmmError::MathOverflow)?;
    let lp_supply = pool
        .lp_supply
        .checked_add(lp_token_amount)
        .ok_or(AmmError::MathOverflow)?;

    pool.vault_0_amount = vault_0_amount;
    pool.vault_1_amount = vault_1_amount;
    pool.lp_supply = lp_supply;
    pool.last_update_timestamp = now;

    let mut settlement = Settlement {
        lp_mint: lp_token_amount,
        ..Default::default()
    };
    settlement.push(TokenSide::Token0, TransferFlow::UserToVault, token_0_amount);
    settlement.push(TokenSide::Token1, TransferFlow::UserToVault, token_1_amount);

    Ok(LiquidityReceipt {
        token_0_amount,
        token_1_amount,
        lp_amount: lp_token_amount,
        snapshot: PoolSnapshot::of(pool)?,
        settlement,
    })
}

/// Burn `lp_token_amount` for the proportional share of both reserves
/// rounded down. Allowed while the pool is closed.
pub fn withdraw(
    pool: &mut PoolState,
    lp_token_amount: u64,
    owner_lp_balance: u64,
    minimum_token_0_amount: u64,
    minimum_token_1_amount: u64,
    now: i64,
) -> Result<LiquidityReceipt> {
    require!(pool.is_initialized(), AmmError::PoolNotOpen);
    require!(lp_token_amount > 0, AmmError::InvalidAmount);
    require!(
        lp_token_amount <= owner_lp_balance,
        AmmError::InsufficientLpBalance
    );

    let lp_supply = pool
        .lp_supply
        .checked_sub(lp_token_amount)
        .ok_or(AmmError::InsufficientLiquidity)?;
    require!(
        lp_supply > pool.locked_lp_amount,
        AmmError::InsufficientLiquidity
    );

    let (reserve_0, reserve_1) = pool.vault_amount_without_fee()?;
    let result = CurveCalculator::amounts_for_withdraw(
        u128::from(lp_token_amount),
        u128::from(reserve_0),
        u128::from(reserve_1),
        u128::from(pool.lp_supply),
    )?;
    let token_0_amount = to_u64(result.token_0_amount)?;
    let token_1_amount = to_u64(result.token_1_amount)?;
    require!(
        token_0_amount > 0 || token_1_amount > 0,
        AmmError::ZeroTradingTokens
    );

    require!(
        token_0_amount >= minimum_token_0_amount && token_1_amount >= minimum_token_1_amount,
        AmmError::SlippageExceeded
    );

    let vault_0_amount = pool
        .vault_0_amount
        .checked_sub(token_0_amount)
        .ok_or(AmmError::InsufficientLiquidity)?;
    let vault_1_amount = pool
        .vault_1_amount
        .checked_sub(token_1_amount)
        .ok_or(AmmError::InsufficientLiquidity)?;

    pool.vault_0_amount = vault_0_amount;
    pool.vault_1_amount = vault_1_amount;
    pool.lp_supply = lp_supply;
    pool.last_update_timestamp = now;

    let mut settlement = Settlement {
        lp_burn: lp_token_amount,
        ..Default::default()
    };
    settlement.push(TokenSide::Token0, TransferFlow::VaultToUser, token_0_amount);
    settlement.push(TokenSide::Token1, TransferFlow::VaultToUser, token_1_amount);

    Ok(LiquidityReceipt {
        token_0_amount,
        token_1_amount,
        lp_amount: lp_token_amount,
        snapshot: PoolSnapshot::of(pool)?,
        settlement,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::admin::{create_fee_schedule, FeeScheduleParams};
    use crate::test_utils::assert_amm_err;

    pub(crate) fn fee_schedule(trade: u64, protocol: u64, fund: u64) -> AmmConfig {
        let mut config = AmmConfig::default();
        create_fee_schedule(
            &mut config,
            FeeScheduleParams {
                index: 0,
                bump: 255,
                owner: Pubkey::new_unique(),
                trade_fee_rate: trade,
                protocol_fee_rate: protocol,
                fund_fee_rate: fund,
                create_pool_fee: 0,
            },
        )
        .unwrap();
        config
    }

    pub(crate) fn ordered_keys() -> PoolKeys {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let (token_0_mint, token_1_mint) = if a < b { (a, b) } else { (b, a) };
        PoolKeys {
            token_0_mint,
            token_1_mint,
            token_0_vault: Pubkey::new_unique(),
            token_1_vault: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            mint_0_decimals: 9,
            mint_1_decimals: 6,
            lp_mint_decimals: 9,
            ..Default::default()
        }
    }

    pub(crate) fn open_pool(config: &AmmConfig, amount_0: u64, amount_1: u64) -> PoolState {
        let mut pool = PoolState::default();
        initialize(&mut pool, config, ordered_keys(), amount_0, amount_1, 0, 1_000).unwrap();
        pool
    }

    #[test]
    fn initialize_with_equal_seeds() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = PoolState::default();
        let receipt = initialize(
            &mut pool,
            &config,
            ordered_keys(),
            10_000_000_000,
            10_000_000_000,
            0,
            1_000,
        )
        .unwrap();

        assert_eq!(pool.vault_0_amount, 10_000_000_000);
        assert_eq!(pool.vault_1_amount, 10_000_000_000);
        assert_eq!(receipt.liquidity, 10_000_000_000);
        assert_eq!(receipt.lp_amount, 10_000_000_000 - 100);
        assert_eq!(pool.lp_supply, 10_000_000_000);
        assert_eq!(pool.status, PoolStatus::Open);
        assert_eq!(receipt.open_time, 1_001);
        assert_eq!(
            receipt.settlement.amount(TokenSide::Token0, TransferFlow::UserToVault),
            10_000_000_000
        );
        assert_eq!(receipt.settlement.lp_mint, 10_000_000_000 - 100);
    }

    #[test]
    fn initialize_keeps_future_open_time() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = PoolState::default();
        let receipt =
            initialize(&mut pool, &config, ordered_keys(), 1_000_000, 1_000_000, 5_000, 1_000)
                .unwrap();
        assert_eq!(receipt.open_time, 5_000);
    }

    #[test]
    fn initialize_twice_is_duplicate() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 1_000_000);
        let before = pool.clone();
        assert_amm_err(
            initialize(&mut pool, &config, ordered_keys(), 5, 5, 0, 2_000),
            AmmError::DuplicatePool,
        );
        assert_eq!(pool.lp_supply, before.lp_supply);
        assert_eq!(pool.token_0_mint, before.token_0_mint);
    }

    #[test]
    fn initialize_validations() {
        let mut config = fee_schedule(0, 0, 0);
        let keys = ordered_keys();

        let mut swapped = keys;
        swapped.token_0_mint = keys.token_1_mint;
        swapped.token_1_mint = keys.token_0_mint;
        assert_amm_err(
            initialize(&mut PoolState::default(), &config, swapped, 10, 10, 0, 1),
            AmmError::InvalidMintOrder,
        );

        assert_amm_err(
            initialize(&mut PoolState::default(), &config, keys, 0, 10, 0, 1),
            AmmError::InvalidAmount,
        );

        // sqrt(100 * 100) == locked amount
        assert_amm_err(
            initialize(&mut PoolState::default(), &config, keys, 100, 100, 0, 1),
            AmmError::InsufficientLiquidity,
        );

        config.disable_create_pool = true;
        assert_amm_err(
            initialize(&mut PoolState::default(), &config, keys, 1_000, 1_000, 0, 1),
            AmmError::NotApproved,
        );
    }

    #[test]
    fn locked_amount_follows_config() {
        let mut config = fee_schedule(0, 0, 0);
        config.locked_lp_amount = 1_000;
        let pool = open_pool(&config, 1_000_000, 1_000_000);
        assert_eq!(pool.locked_lp_amount, 1_000);
        assert_eq!(pool.lp_supply, 1_000_000);
    }

    #[test]
    fn deposit_rounds_up() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 10_000_000_000, 10_000_000_000);
        let supply = pool.lp_supply;

        let receipt = deposit(&mut pool, 10_000_000_000, u64::MAX, u64::MAX, 2_000).unwrap();

        let expected = (10_000_000_000u128 * 10_000_000_000u128).div_ceil(u128::from(supply)) as u64;
        assert_eq!(receipt.token_0_amount, expected);
        assert_eq!(receipt.token_1_amount, expected);
        assert_eq!(pool.lp_supply, supply + 10_000_000_000);
        assert_eq!(receipt.snapshot.lp_supply, pool.lp_supply);
        assert_eq!(receipt.settlement.lp_mint, 10_000_000_000);
    }

    #[test]
    fn deposit_of_one_lp_charges_one_unit_each() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 4_000_000);
        let receipt = deposit(&mut pool, 1, u64::MAX, u64::MAX, 2_000).unwrap();
        // 1 * 1e6 / 2e6 = 0.5 and 1 * 4e6 / 2e6 = 2
        assert_eq!((receipt.token_0_amount, receipt.token_1_amount), (1, 2));
    }

    #[test]
    fn deposit_slippage_and_state() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 1_000_000);
        let before = pool.clone();

        assert_amm_err(
            deposit(&mut pool, 1_000, 999, u64::MAX, 2_000),
            AmmError::SlippageExceeded,
        );
        assert_eq!(pool.vault_0_amount, before.vault_0_amount);
        assert_eq!(pool.lp_supply, before.lp_supply);

        assert_amm_err(deposit(&mut pool, 0, 1, 1, 2_000), AmmError::InvalidAmount);

        pool.status = PoolStatus::Closed;
        assert_amm_err(
            deposit(&mut pool, 1_000, u64::MAX, u64::MAX, 2_000),
            AmmError::PoolNotOpen,
        );
        assert_amm_err(
            deposit(&mut PoolState::default(), 1_000, u64::MAX, u64::MAX, 2_000),
            AmmError::PoolNotOpen,
        );
    }

    #[test]
    fn withdraw_half_of_holding() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 10_000_000_000, 10_000_000_000);
        deposit(&mut pool, 10_000_000_000, u64::MAX, u64::MAX, 2_000).unwrap();
        let supply = pool.lp_supply;

        let receipt = withdraw(&mut pool, 5_000_000_000, 10_000_000_000, 0, 0, 3_000).unwrap();

        assert_eq!(pool.lp_supply, supply - 5_000_000_000);
        assert_eq!(receipt.token_0_amount, 5_000_000_000);
        assert_eq!(receipt.settlement.lp_burn, 5_000_000_000);
        assert_eq!(
            receipt.settlement.amount(TokenSide::Token1, TransferFlow::VaultToUser),
            5_000_000_000
        );
    }

    #[test]
    fn withdraw_rounds_down() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 4_000_000);
        // supply 2_000_000; 3 * 1e6 / 2e6 = 1.5
        let receipt = withdraw(&mut pool, 3, 3, 0, 0, 2_000).unwrap();
        assert_eq!((receipt.token_0_amount, receipt.token_1_amount), (1, 6));
    }

    #[test]
    fn withdraw_allowed_while_closed() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 1_000_000);
        pool.status = PoolStatus::Closed;
        assert!(withdraw(&mut pool, 1_000, 1_000, 0, 0, 2_000).is_ok());
    }

    #[test]
    fn withdraw_cannot_reach_locked_floor() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 1_000_000);
        let creator_lp = pool.lp_supply - pool.locked_lp_amount;

        assert_amm_err(
            withdraw(&mut pool, creator_lp, creator_lp, 0, 0, 2_000),
            AmmError::InsufficientLiquidity,
        );
        withdraw(&mut pool, creator_lp - 1, creator_lp, 0, 0, 2_000).unwrap();
        assert_eq!(pool.lp_supply, pool.locked_lp_amount + 1);
        assert!(pool.vault_0_amount > 0 && pool.vault_1_amount > 0);
    }

    #[test]
    fn withdraw_validations() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 1_000_000);

        assert_amm_err(withdraw(&mut pool, 0, 10, 0, 0, 2_000), AmmError::InvalidAmount);
        assert_amm_err(
            withdraw(&mut pool, 11, 10, 0, 0, 2_000),
            AmmError::InsufficientLpBalance,
        );
        assert_amm_err(
            withdraw(&mut pool, 1_000, 1_000, 1_001, 0, 2_000),
            AmmError::SlippageExceeded,
        );
        assert_amm_err(
            withdraw(&mut PoolState::default(), 1, 1, 0, 0, 2_000),
            AmmError::PoolNotOpen,
        );
    }
}
