//! Pool and fee-schedule operations over in-memory records.
//!
//! Every operation validates and computes first and writes last, so an `Err`
//! leaves the records untouched. Successful operations return a receipt
//! whose [`Settlement`] lists the token movements the host must perform to
//! keep the custodial vaults equal to the ledger; the instruction handlers
//! apply it in the same transaction.

pub mod admin;
pub mod fee_collection;
pub mod liquidity;
pub mod swap;

#[cfg(test)]
mod proptest_properties;

pub use admin::*;
pub use fee_collection::*;
pub use liquidity::*;
pub use swap::*;

use anchor_lang::prelude::*;

use crate::state::{PoolState, TokenSide};

/// Direction of a token movement relative to the pool vaults
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferFlow {
    /// Caller's token account into the vault
    UserToVault,
    /// Vault into the caller's token account
    VaultToUser,
    /// Vault into a fee recipient's token account
    VaultToRecipient,
}

/// One token movement the host must carry out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenTransfer {
    pub side: TokenSide,
    pub flow: TransferFlow,
    pub amount: u64,
}

/// Everything an operation needs moved outside the ledger
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    pub transfers: Vec<TokenTransfer>,
    /// LP tokens to mint to the caller
    pub lp_mint: u64,
    /// LP tokens to burn from the caller
    pub lp_burn: u64,
    /// Lamports the caller pays to the protocol owner
    pub lamports_fee: u64,
}

impl Settlement {
    fn push(&mut self, side: TokenSide, flow: TransferFlow, amount: u64) {
        if amount > 0 {
            self.transfers.push(TokenTransfer { side, flow, amount });
        }
    }

    /// Total moved for `side` in `flow`
    pub fn amount(&self, side: TokenSide, flow: TransferFlow) -> u64 {
        self.transfers
            .iter()
            .filter(|t| t.side == side && t.flow == flow)
            .map(|t| t.amount)
            .sum()
    }
}

/// Curve reserves and LP supply after an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub reserve_0: u64,
    pub reserve_1: u64,
    pub lp_supply: u64,
}

impl PoolSnapshot {
    pub fn of(pool: &PoolState) -> Result<Self> {
        let (reserve_0, reserve_1) = pool.vault_amount_without_fee()?;
        Ok(Self {
            reserve_0,
            reserve_1,
            lp_supply: pool.lp_supply,
        })
    }
}
