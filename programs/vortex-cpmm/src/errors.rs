use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    // Amounts
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,

    #[msg("Insufficient liquidity")]
    InsufficientLiquidity,

    #[msg("LP amount exceeds the owner's balance")]
    InsufficientLpBalance,

    #[msg("Computed trading token amount is zero")]
    ZeroTradingTokens,

    // Math
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invariant violated")]
    InvariantViolation,

    // Lifecycle
    #[msg("Pool is not open")]
    PoolNotOpen,

    #[msg("Pool already exists")]
    DuplicatePool,

    #[msg("Fee schedule already exists")]
    DuplicateFeeSchedule,

    #[msg("Operation not approved")]
    NotApproved,

    // Configuration
    #[msg("Invalid fee parameters")]
    InvalidFeeParameters,

    #[msg("Invalid input")]
    InvalidInput,

    // Accounts
    #[msg("Asset does not belong to the pool")]
    AssetMismatch,

    #[msg("Token mints must be distinct and ordered")]
    InvalidMintOrder,

    #[msg("Invalid vault")]
    InvalidVault,

    #[msg("Vault balance below ledger amount")]
    VaultBalanceMismatch,

    #[msg("Mint is not supported")]
    UnsupportedMint,

    // Permissions
    #[msg("Invalid owner")]
    InvalidOwner,
}
