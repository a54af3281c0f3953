use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Validates that the expiration slot lies after the current slot
pub fn validate_expiration(expiration_slot: u64, current_slot: u64) -> Result<()> {
    require!(expiration_slot > current_slot, ErrorCode::ExpirationInPast);
    Ok(())
}

/// Validates that strike price is non-zero
pub fn validate_strike_price(strike_price: u64) -> Result<()> {
    require!(strike_price > 0, ErrorCode::InvalidStrikePrice);
    Ok(())
}

/// Validates that a converted amount did not floor to zero
pub fn validate_nonzero_value(value: u64) -> Result<()> {
    require!(value > 0, ErrorCode::AmountTooLow);
    Ok(())
}

/// Validates that the vault holds enough to cover a payout
pub fn validate_vault_balance(vault_balance: u64, required: u64) -> Result<()> {
    require!(vault_balance >= required, ErrorCode::InsufficientCollateral);
    Ok(())
}

/// Validates that a holder owns enough of an asset
pub fn validate_holder_balance(balance: u64, required: u64) -> Result<()> {
    require!(balance >= required, ErrorCode::InsufficientBalance);
    Ok(())
}
