use anchor_lang::prelude::*;

use super::{PoolSnapshot, Settlement, TransferFlow};
use crate::errors::AmmError;
use crate::state::{PoolState, TokenSide};

/// Which fee counter is being paid out
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeRecipient {
    Protocol,
    Fund,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeCollectionReceipt {
    pub recipient: FeeRecipient,
    pub amount_0: u64,
    pub amount_1: u64,
    pub snapshot: PoolSnapshot,
    pub settlement: Settlement,
}

/// Pay out owed fees, capped per token at what is owed. Curve reserves are
/// unchanged since owed fees were never part of them.
pub fn collect_fees(
    pool: &mut PoolState,
    recipient: FeeRecipient,
    amount_0_requested: u64,
    amount_1_requested: u64,
    now: i64,
) -> Result<FeeCollectionReceipt> {
    require!(pool.is_initialized(), AmmError::PoolNotOpen);

    let (owed_0, owed_1) = match recipient {
        FeeRecipient::Protocol => (pool.protocol_fees_token_0, pool.protocol_fees_token_1),
        FeeRecipient::Fund => (pool.fund_fees_token_0, pool.fund_fees_token_1),
    };
    let amount_0 = amount_0_requested.min(owed_0);
    let amount_1 = amount_1_requested.min(owed_1);

    let vault_0_amount = pool
        .vault_0_amount
        .checked_sub(amount_0)
        .ok_or(AmmError::MathOverflow)?;
    let vault_1_amount = pool
        .vault_1_amount
        .checked_sub(amount_1)
        .ok_or(AmmError::MathOverflow)?;

    match recipient {
        FeeRecipient::Protocol => {
            pool.protocol_fees_token_0 = owed_0 - amount_0;
            pool.protocol_fees_token_1 = owed_1 - amount_1;
        }
        FeeRecipient::Fund => {
            pool.fund_fees_token_0 = owed_0 - amount_0;
            pool.fund_fees_token_1 = owed_1 - amount_1;
        }
    }
    pool.vault_0_amount = vault_0_amount;
    pool.vault_1_amount = vault_1_amount;
    pool.last_update_timestamp = now;

    let mut settlement = Settlement::default();
    settlement.push(TokenSide::Token0, TransferFlow::VaultToRecipient, amount_0);
    settlement.push(TokenSide::Token1, TransferFlow::VaultToRecipient, amount_1);

    Ok(FeeCollectionReceipt {
        recipient,
        amount_0,
        amount_1,
        snapshot: PoolSnapshot::of(pool)?,
        settlement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::liquidity::tests::{fee_schedule, open_pool};
    use crate::engine::swap::swap_base_input;
    use crate::state::{ObservationState, PoolStatus};
    use crate::test_utils::assert_amm_err;

    fn pool_with_owed_fees() -> PoolState {
        let config = fee_schedule(2_500, 120_000, 40_000);
        let mut pool = open_pool(&config, 5_000_000_000, 5_000_000_000);
        let mut observation = ObservationState::default();
        let mint_0 = pool.token_0_mint;
        let mint_1 = pool.token_1_mint;
        swap_base_input(&mut pool, &config, &mut observation, &mint_0, 400_000_000, 0, 2_000)
            .unwrap();
        swap_base_input(&mut pool, &config, &mut observation, &mint_1, 200_000_000, 0, 2_001)
            .unwrap();
        pool
    }

    #[test]
    fn protocol_collection_caps_at_owed() {
        let mut pool = pool_with_owed_fees();
        // 400_000_000 * 0.25% = 1_000_000 trade fee, 12% of it to the protocol
        assert_eq!(pool.protocol_fees_token_0, 120_000);
        assert_eq!(pool.protocol_fees_token_1, 60_000);
        let reserves = pool.vault_amount_without_fee().unwrap();
        let vault_0 = pool.vault_0_amount;

        let receipt =
            collect_fees(&mut pool, FeeRecipient::Protocol, u64::MAX, 10_000, 3_000).unwrap();

        assert_eq!(receipt.amount_0, 120_000);
        assert_eq!(receipt.amount_1, 10_000);
        assert_eq!(pool.protocol_fees_token_0, 0);
        assert_eq!(pool.protocol_fees_token_1, 50_000);
        assert_eq!(pool.vault_0_amount, vault_0 - 120_000);
        assert_eq!(pool.vault_amount_without_fee().unwrap(), reserves);
        assert_eq!(
            receipt.settlement.amount(TokenSide::Token0, TransferFlow::VaultToRecipient),
            120_000
        );
    }

    #[test]
    fn fund_collection_only_touches_fund_counters() {
        let mut pool = pool_with_owed_fees();
        assert_eq!(pool.fund_fees_token_0, 40_000);
        let protocol_before = (pool.protocol_fees_token_0, pool.protocol_fees_token_1);

        let receipt = collect_fees(&mut pool, FeeRecipient::Fund, u64::MAX, u64::MAX, 3_000).unwrap();

        assert_eq!((receipt.amount_0, receipt.amount_1), (40_000, 20_000));
        assert_eq!((pool.fund_fees_token_0, pool.fund_fees_token_1), (0, 0));
        assert_eq!(
            (pool.protocol_fees_token_0, pool.protocol_fees_token_1),
            protocol_before
        );
    }

    #[test]
    fn nothing_owed_moves_nothing() {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, 1_000_000, 1_000_000);
        let receipt = collect_fees(&mut pool, FeeRecipient::Fund, 5, 5, 2_000).unwrap();
        assert_eq!((receipt.amount_0, receipt.amount_1), (0, 0));
        assert!(receipt.settlement.transfers.is_empty());
    }

    #[test]
    fn closed_pool_can_still_pay_out() {
        let mut pool = pool_with_owed_fees();
        pool.status = PoolStatus::Closed;
        assert!(collect_fees(&mut pool, FeeRecipient::Protocol, 1, 1, 3_000).is_ok());
        assert_amm_err(
            collect_fees(&mut PoolState::default(), FeeRecipient::Protocol, 1, 1, 3_000),
            AmmError::PoolNotOpen,
        );
    }
}
