use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Expiration must be in the future")]
    ExpirationInPast,

    #[msg("Strike price must be greater than zero")]
    InvalidStrikePrice,

    #[msg("Amount too low")]
    AmountTooLow,

    #[msg("Math operation overflow")]
    MathOverflow,

    #[msg("Invalid underlying mint")]
    InvalidUnderlyingMint,

    #[msg("Option decimals must match underlying decimals")]
    InvalidDecimals,

    #[msg("Option has expired")]
    OptionExpired,

    #[msg("Option has not expired yet")]
    OptionNotExpired,

    #[msg("Transfer amount exceeds balance")]
    InsufficientBalance,

    #[msg("Transfer amount exceeds allowance")]
    InsufficientAllowance,

    #[msg("Insufficient collateral in vault")]
    InsufficientCollateral,

    #[msg("Burn amount exceeds locked collateral")]
    InsufficientLockedCollateral,

    #[msg("You do not have balance to withdraw")]
    NoWithdrawableBalance,

    #[msg("Vault received a different amount than was sent")]
    TransferAmountMismatch,

    #[msg("Token account does not belong to the signer")]
    InvalidTokenAccount,
}
