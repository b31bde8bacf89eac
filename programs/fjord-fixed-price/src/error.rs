use anchor_lang::prelude::*;

// Errors
#[error_code]
pub enum PoolError {
    // Configuration
    #[msg("Asset and share token mints must be different and non-null")]
    InvalidAssetOrShare,
    #[msg("Sale period is too low")]
    SalePeriodTooShort,
    #[msg("Soft cap and buy limit must not exceed the hard cap")]
    InvalidCapConfig,
    #[msg("Price must be non-zero and fit in 11 bytes")]
    InvalidPrice,
    #[msg("Sale timestamps must fit in 5 bytes")]
    TimestampOutOfRange,
    #[msg("Fee exceeds the maximum allowed")]
    MaxFeeExceeded,
    #[msg("Config hash does not match the packed sale configuration")]
    ConfigHashMismatch,
    #[msg("Mint does not match the pool configuration")]
    InvalidMint,
    #[msg("Token account is not owned by the expected wallet")]
    InvalidTokenOwner,

    // Access
    #[msg("Buyer is not on the allow list")]
    AllowListRejected,
    #[msg("Caller is not the pool creator")]
    NotPoolCreator,

    // State
    #[msg("Trading is only allowed between sale start and sale end")]
    TradingDisallowed,
    #[msg("Pool is paused")]
    PoolPaused,
    #[msg("Pool is already closed or the sale has not ended")]
    ClosingDisallowed,
    #[msg("Redemption is only allowed once the pool is closed")]
    RedeemDisallowed,
    #[msg("Pool is locked by an operation in progress")]
    ReentrantCall,

    // Limits
    #[msg("Purchase exceeds the per-buyer limit")]
    BuyLimitExceeded,
    #[msg("Purchase exceeds the hard cap")]
    HardCapExceeded,

    // Integrity
    #[msg("Pool holds fewer shares than were sold")]
    InsufficientShareBalance,
}

#[error_code(offset = 7000)]
pub enum AccessControlError {
    #[msg("Caller is not owner.")]
    Unauthorized,
}

#[error_code(offset = 8000)]
pub enum SafeMathError {
    #[msg("Addition overflow")]
    AdditionOverflow,
    #[msg("Subtraction underflow")]
    SubtractionUnderflow,
    #[msg("Multiplication overflow")]
    MultiplicationOverflow,
    #[msg("Division by zero")]
    DivisionUnderflow,
    #[msg("Value does not fit the target type")]
    ConversionOverflow,
}
