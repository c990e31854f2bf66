//! Property-based checks of the pool invariants with `proptest`.
//!
//! 1. The curve product never decreases across a swap, for either exact
//!    input or exact output.
//! 2. Quoting back and forth never favours the trader.
//! 3. Deposit then withdraw of the same LP amount returns at most the deposit.
//! 4. Withdrawals can never take the supply down to the locked amount.
//! 5. Vault ledgers move exactly by the settled transfers.

use proptest::prelude::*;

use super::liquidity::tests::{fee_schedule, open_pool};
use super::*;
use crate::curve::CurveCalculator;
use crate::errors::AmmError;
use crate::state::{ObservationState, TokenSide};

const NOW: i64 = 2_000;

fn reserve_strategy() -> impl Strategy<Value = u64> {
    1_000_000u64..=1_000_000_000_000u64
}

/// Swap size as basis points of the input reserve, 0.01% to 10%
fn fraction_bps_strategy() -> impl Strategy<Value = u64> {
    1u64..=1_000u64
}

fn fee_rates_strategy() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..=100_000u64, 0u64..=500_000u64, 0u64..=500_000u64)
}

/// Trade fee anywhere below 100%, protocol and fund shares summing to at
/// most 100%
fn wide_fee_rates_strategy() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..=999_999u64, 0u64..=500_000u64, 0u64..=500_000u64)
}

fn is_amm_err(error: &anchor_lang::error::Error, expected: AmmError) -> bool {
    match error {
        anchor_lang::error::Error::AnchorError(e) => {
            e.error_code_number == u32::from(expected)
        }
        _ => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_product_never_decreases(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        bps in fraction_bps_strategy(),
        (trade, protocol, fund) in fee_rates_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let config = fee_schedule(trade, protocol, fund);
        let mut pool = open_pool(&config, r0, r1);
        let mut observation = ObservationState::default();
        let k_before = pool.k().unwrap();

        let (mint, reserve_in) = if zero_for_one {
            (pool.token_0_mint, r0)
        } else {
            (pool.token_1_mint, r1)
        };
        let amount_in = (reserve_in / 10_000 * bps).max(1);

        match swap_base_input(&mut pool, &config, &mut observation, &mint, amount_in, 0, NOW) {
            Ok(_) => {
                prop_assert!(
                    pool.k().unwrap() >= k_before,
                    "k fell from {} to {}", k_before, pool.k().unwrap()
                );
            }
            Err(e) => {
                prop_assert!(is_amm_err(&e, AmmError::ZeroTradingTokens), "{:?}", e);
            }
        }
    }

    #[test]
    fn prop_base_output_product_never_decreases(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        bps in fraction_bps_strategy(),
        (trade, protocol, fund) in wide_fee_rates_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let config = fee_schedule(trade, protocol, fund);
        let mut pool = open_pool(&config, r0, r1);
        let mut observation = ObservationState::default();
        let k_before = pool.k().unwrap();

        let (mint, reserve_out) = if zero_for_one {
            (pool.token_0_mint, r1)
        } else {
            (pool.token_1_mint, r0)
        };
        let amount_out = (reserve_out / 10_000 * bps).max(1);

        let receipt = match swap_base_output(
            &mut pool,
            &config,
            &mut observation,
            &mint,
            amount_out,
            u64::MAX,
            NOW,
        ) {
            Ok(receipt) => receipt,
            Err(e) => return Err(TestCaseError::fail(format!("{:?}", e))),
        };

        prop_assert_eq!(receipt.amount_out, amount_out);
        prop_assert!(receipt.trade_fee >= receipt.protocol_fee + receipt.fund_fee);
        prop_assert!(
            pool.k().unwrap() >= k_before,
            "k fell from {} to {}", k_before, pool.k().unwrap()
        );
    }

    #[test]
    fn prop_round_trip_favours_pool(
        reserve_in in reserve_strategy(),
        reserve_out in reserve_strategy(),
        bps in fraction_bps_strategy(),
        (trade, protocol, fund) in fee_rates_strategy(),
    ) {
        let amount_in = u128::from((reserve_in / 10_000 * bps).max(1));
        let forward = CurveCalculator::swap_base_input(
            amount_in,
            u128::from(reserve_in),
            u128::from(reserve_out),
            trade,
            protocol,
            fund,
        )
        .unwrap();
        let produced = forward.destination_amount_swapped;
        prop_assume!(produced > 0);

        let quote = CurveCalculator::swap_base_output(
            produced,
            u128::from(reserve_in),
            u128::from(reserve_out),
            trade,
            protocol,
            fund,
        )
        .unwrap();
        prop_assert!(
            quote.source_amount_swapped <= amount_in,
            "exact-output quote {} exceeds the input that produced it {}",
            quote.source_amount_swapped,
            amount_in
        );

        let replay = CurveCalculator::swap_base_input(
            quote.source_amount_swapped,
            u128::from(reserve_in),
            u128::from(reserve_out),
            trade,
            protocol,
            fund,
        )
        .unwrap();
        prop_assert!(replay.destination_amount_swapped >= produced);
    }

    #[test]
    fn prop_deposit_withdraw_never_profits(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        lp in 1u64..=1_000_000_000u64,
    ) {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, r0, r1);

        let deposited = deposit(&mut pool, lp, u64::MAX, u64::MAX, NOW).unwrap();
        let withdrawn = withdraw(&mut pool, lp, lp, 0, 0, NOW).unwrap();

        prop_assert!(withdrawn.token_0_amount <= deposited.token_0_amount);
        prop_assert!(withdrawn.token_1_amount <= deposited.token_1_amount);
        prop_assert!(pool.vault_0_amount >= r0 && pool.vault_1_amount >= r1);
    }

    #[test]
    fn prop_supply_stays_above_locked(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        steps in proptest::collection::vec(1u64..=10_000u64, 1..8),
    ) {
        let config = fee_schedule(0, 0, 0);
        let mut pool = open_pool(&config, r0, r1);
        let mut creator_lp = pool.lp_supply - pool.locked_lp_amount;

        for bps in steps {
            let lp = (creator_lp / 10_000 * bps).max(1).min(creator_lp);
            match withdraw(&mut pool, lp, creator_lp, 0, 0, NOW) {
                Ok(_) => creator_lp -= lp,
                Err(e) => {
                    prop_assert!(
                        is_amm_err(&e, AmmError::InsufficientLiquidity)
                            || is_amm_err(&e, AmmError::ZeroTradingTokens),
                        "{:?}", e
                    );
                }
            }
            prop_assert!(pool.lp_supply > pool.locked_lp_amount);
            prop_assert!(pool.vault_0_amount > 0 && pool.vault_1_amount > 0);
        }
    }

    #[test]
    fn prop_ledger_tracks_settlement(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        (trade, protocol, fund) in fee_rates_strategy(),
        swaps in proptest::collection::vec((fraction_bps_strategy(), any::<bool>()), 1..6),
    ) {
        let config = fee_schedule(trade, protocol, fund);
        let mut pool = open_pool(&config, r0, r1);
        let mut observation = ObservationState::default();
        let mut expected = [u128::from(r0), u128::from(r1)];

        for (i, (bps, zero_for_one)) in swaps.into_iter().enumerate() {
            let (reserve_0, reserve_1) = pool.vault_amount_without_fee().unwrap();
            let (mint, reserve_in) = if zero_for_one {
                (pool.token_0_mint, reserve_0)
            } else {
                (pool.token_1_mint, reserve_1)
            };
            let amount_in = (reserve_in / 10_000 * bps).max(1);
            let Ok(receipt) = swap_base_input(
                &mut pool,
                &config,
                &mut observation,
                &mint,
                amount_in,
                0,
                NOW + i as i64,
            ) else {
                continue;
            };

            for side in [TokenSide::Token0, TokenSide::Token1] {
                let paid_in = receipt.settlement.amount(side, TransferFlow::UserToVault);
                let paid_out = receipt.settlement.amount(side, TransferFlow::VaultToUser);
                expected[side.index()] =
                    expected[side.index()] + u128::from(paid_in) - u128::from(paid_out);
            }
            prop_assert_eq!(u128::from(pool.vault_0_amount), expected[0]);
            prop_assert_eq!(u128::from(pool.vault_1_amount), expected[1]);
            prop_assert!(receipt.trade_fee >= receipt.protocol_fee + receipt.fund_fee);
        }
    }
}
