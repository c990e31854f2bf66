use anchor_lang::prelude::*;

use crate::constants::*;
use crate::curve::TradeDirection;
use crate::errors::AmmError;

/// Pool lifecycle. Nothing returns to `Uninitialized`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum PoolStatus {
    #[default]
    Uninitialized,
    /// Deposits, withdrawals and swaps allowed
    Open,
    /// Only withdrawals allowed
    Closed,
}

impl TryFrom<u8> for PoolStatus {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(PoolStatus::Uninitialized),
            1 => Ok(PoolStatus::Open),
            2 => Ok(PoolStatus::Closed),
            _ => err!(AmmError::InvalidInput),
        }
    }
}

/// Side of the pool's canonical pair
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenSide {
    Token0,
    Token1,
}

impl TokenSide {
    pub fn index(&self) -> usize {
        match self {
            TokenSide::Token0 => 0,
            TokenSide::Token1 => 1,
        }
    }
}

/// Liquidity pool state and reserve ledger
/// PDA Seeds: ["pool", amm_config, token_0_mint, token_1_mint]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct PoolState {
    /// Version for future upgrades
    pub version: u8,

    /// Bump seed for PDA
    pub bump: u8,

    /// Vault and LP mint authority bump
    pub auth_bump: u8,

    /// Fee schedule the pool belongs to
    pub amm_config: Pubkey,

    /// Pool creator
    pub pool_creator: Pubkey,

    /// Token 0 vault (PDA-owned)
    pub token_0_vault: Pubkey,

    /// Token 1 vault (PDA-owned)
    pub token_1_vault: Pubkey,

    /// LP token mint (PDA)
    pub lp_mint: Pubkey,

    /// Token 0 mint, strictly smaller than token 1 mint
    pub token_0_mint: Pubkey,

    /// Token 1 mint
    pub token_1_mint: Pubkey,

    /// Token program of token 0
    pub token_0_program: Pubkey,

    /// Token program of token 1
    pub token_1_program: Pubkey,

    /// Observation log account
    pub observation_key: Pubkey,

    /// Lifecycle status
    pub status: PoolStatus,

    pub lp_mint_decimals: u8,
    pub mint_0_decimals: u8,
    pub mint_1_decimals: u8,

    /// Total LP supply, locked amount included
    pub lp_supply: u64,

    /// LP tokens withheld at creation and never redeemable
    pub locked_lp_amount: u64,

    /// Ledger balance of token 0 vault
    pub vault_0_amount: u64,

    /// Ledger balance of token 1 vault
    pub vault_1_amount: u64,

    /// Token 0 owed to the protocol fee recipient
    pub protocol_fees_token_0: u64,

    /// Token 1 owed to the protocol fee recipient
    pub protocol_fees_token_1: u64,

    /// Token 0 owed to the fund fee recipient
    pub fund_fees_token_0: u64,

    /// Token 1 owed to the fund fee recipient
    pub fund_fees_token_1: u64,

    /// Swaps are refused before this timestamp
    pub open_time: u64,

    /// Pool creation timestamp
    pub created_at: i64,

    /// Total number of swaps
    pub total_swaps: u64,

    /// Cumulative swap volume in token 0
    pub cumulative_volume_0: u128,

    /// Cumulative swap volume in token 1
    pub cumulative_volume_1: u128,

    /// Last mutation timestamp
    pub last_update_timestamp: i64,

    /// Reserved for future upgrades
    pub padding: [u64; 16],
}

impl PoolState {
    /// Deterministic address of the pool for a config and ordered mint pair
    pub fn pda(amm_config: &Pubkey, token_0_mint: &Pubkey, token_1_mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                POOL_SEED,
                amm_config.as_ref(),
                token_0_mint.as_ref(),
                token_1_mint.as_ref(),
            ],
            &crate::ID,
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.status != PoolStatus::Uninitialized
    }

    pub fn is_open(&self) -> bool {
        self.status == PoolStatus::Open
    }

    /// Curve reserves: ledger vault balances less fees owed to recipients
    pub fn vault_amount_without_fee(&self) -> Result<(u64, u64)> {
        let reserve_0 = self
            .vault_0_amount
            .checked_sub(self.protocol_fees_token_0)
            .and_then(|v| v.checked_sub(self.fund_fees_token_0))
            .ok_or(AmmError::MathOverflow)?;
        let reserve_1 = self
            .vault_1_amount
            .checked_sub(self.protocol_fees_token_1)
            .and_then(|v| v.checked_sub(self.fund_fees_token_1))
            .ok_or(AmmError::MathOverflow)?;
        Ok((reserve_0, reserve_1))
    }

    /// Calculate invariant k = reserve_0 * reserve_1
    pub fn k(&self) -> Result<u128> {
        let (reserve_0, reserve_1) = self.vault_amount_without_fee()?;
        Ok(u128::from(reserve_0) * u128::from(reserve_1))
    }

    /// Q32 prices of token 0 in token 1 and of token 1 in token 0
    pub fn token_price_x32(reserve_0: u64, reserve_1: u64) -> (u128, u128) {
        if reserve_0 == 0 || reserve_1 == 0 {
            return (0, 0);
        }
        (
            u128::from(reserve_1) * Q32 / u128::from(reserve_0),
            u128::from(reserve_0) * Q32 / u128::from(reserve_1),
        )
    }

    /// Direction of a swap paying in `input_mint`
    pub fn trade_direction(&self, input_mint: &Pubkey) -> Result<TradeDirection> {
        if *input_mint == self.token_0_mint {
            Ok(TradeDirection::ZeroForOne)
        } else if *input_mint == self.token_1_mint {
            Ok(TradeDirection::OneForZero)
        } else {
            err!(AmmError::AssetMismatch)
        }
    }

    pub fn mint(&self, side: TokenSide) -> Pubkey {
        match side {
            TokenSide::Token0 => self.token_0_mint,
            TokenSide::Token1 => self.token_1_mint,
        }
    }

    pub fn vault(&self, side: TokenSide) -> Pubkey {
        match side {
            TokenSide::Token0 => self.token_0_vault,
            TokenSide::Token1 => self.token_1_vault,
        }
    }

    pub fn token_program(&self, side: TokenSide) -> Pubkey {
        match side {
            TokenSide::Token0 => self.token_0_program,
            TokenSide::Token1 => self.token_1_program,
        }
    }

    /// Real vault balances must cover the ledger. Donations may push a vault
    /// above its ledger amount; a vault below it means tokens left without
    /// the engine's knowledge.
    pub fn vaults_cover_ledger(&self, vault_0_balance: u64, vault_1_balance: u64) -> bool {
        vault_0_balance >= self.vault_0_amount && vault_1_balance >= self.vault_1_amount
    }

    /// Record swap statistics
    pub(crate) fn record_swap(
        &mut self,
        volume_0: u64,
        volume_1: u64,
        timestamp: i64,
    ) {
        self.total_swaps = self.total_swaps.saturating_add(1);
        self.cumulative_volume_0 = self.cumulative_volume_0.saturating_add(u128::from(volume_0));
        self.cumulative_volume_1 = self.cumulative_volume_1.saturating_add(u128::from(volume_1));
        self.last_update_timestamp = timestamp;
    }
}
