/// Vortex CPMM Constants

// ============================================================================
// SCALING CONSTANTS
// ============================================================================

/// Fee rate denominator: rates are parts-per-million (100% = 1_000_000)
pub const FEE_RATE_DENOMINATOR_VALUE: u64 = 1_000_000;

/// Precision for observation prices (2^32)
pub const Q32: u128 = 1u128 << 32;

/// LP tokens withheld forever on pool creation, unless the fee schedule overrides it
pub const DEFAULT_LOCKED_LP_AMOUNT: u64 = 100;

/// Decimals of every pool's LP mint
pub const LP_MINT_DECIMALS: u8 = 9;

/// Anchor account discriminator length
pub const DISCRIMINATOR: usize = 8;

// ============================================================================
// OBSERVATIONS
// ============================================================================

/// Capacity of each pool's observation ring buffer
pub const OBSERVATION_NUM: usize = 100;

// ============================================================================
// PDA SEEDS
// ============================================================================

/// Seed for fee schedule PDA, followed by the big-endian index
pub const AMM_CONFIG_SEED: &[u8] = b"amm_config";

/// Seed for pool PDA, followed by config, token 0 mint, token 1 mint
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for vault PDAs, followed by pool and mint
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for LP token mint PDA
pub const POOL_LP_MINT_SEED: &[u8] = b"pool_lp_mint";

/// Seed for observation PDA
pub const OBSERVATION_SEED: &[u8] = b"observation";

/// Seed for the program-wide vault and LP mint authority
pub const AUTH_SEED: &[u8] = b"vault_and_lp_mint_auth_seed";

// ============================================================================
// PROTOCOL
// ============================================================================

/// Current account layout version. Zero marks a record that was never created.
pub const PROTOCOL_VERSION: u8 = 1;

// ============================================================================
// HELPERS
// ============================================================================

/// Validate a fee schedule's rates.
///
/// The trade fee must be strictly below 100% and the protocol and fund
/// carve-outs, both fractions of the trade fee, may not exceed it together.
pub fn validate_fee_rates(trade_fee_rate: u64, protocol_fee_rate: u64, fund_fee_rate: u64) -> bool {
    if trade_fee_rate >= FEE_RATE_DENOMINATOR_VALUE {
        return false;
    }
    match protocol_fee_rate.checked_add(fund_fee_rate) {
        Some(total) => total <= FEE_RATE_DENOMINATOR_VALUE,
        None => false,
    }
}
