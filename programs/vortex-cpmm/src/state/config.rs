use anchor_lang::prelude::*;

use crate::constants::*;

/// Fee schedule shared by every pool created under its index
/// PDA Seeds: ["amm_config", index.to_be_bytes()]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct AmmConfig {
    /// Layout version, zero until created
    pub version: u8,

    /// Bump seed for PDA
    pub bump: u8,

    /// Config index
    pub index: u16,

    /// Blocks creation of new pools under this config
    pub disable_create_pool: bool,

    /// Trade fee, parts-per-million of the swap input
    pub trade_fee_rate: u64,

    /// Protocol share, parts-per-million of the trade fee
    pub protocol_fee_rate: u64,

    /// Fund share, parts-per-million of the trade fee
    pub fund_fee_rate: u64,

    /// Lamports charged to a pool creator
    pub create_pool_fee: u64,

    /// LP tokens withheld on creation of pools under this config
    pub locked_lp_amount: u64,

    /// Authority that created the config
    pub owner: Pubkey,

    /// Recipient of protocol fees
    pub protocol_owner: Pubkey,

    /// Recipient of fund fees
    pub fund_owner: Pubkey,

    /// Reserved for future upgrades
    pub padding: [u64; 16],
}

impl AmmConfig {
    /// Deterministic address of the config at `index`
    pub fn pda(index: u16) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[AMM_CONFIG_SEED, &index.to_be_bytes()], &crate::ID)
    }

    /// Whether the record has been created
    pub fn is_initialized(&self) -> bool {
        self.version != 0
    }

    /// Check rates against the denominator
    pub fn has_valid_rates(&self) -> bool {
        validate_fee_rates(
            self.trade_fee_rate,
            self.protocol_fee_rate,
            self.fund_fee_rate,
        )
    }

    /// Whether `key` may administer this config
    pub fn is_authority(&self, key: &Pubkey) -> bool {
        *key == self.owner || *key == crate::admin::ID
    }
}
