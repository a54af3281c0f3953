use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Converts an amount of option units into strike-asset units:
/// value = floor(amount × strike_price / 10^option_decimals)
///
/// Option decimals equal underlying decimals, so the division removes the
/// underlying precision and leaves the result in the strike asset's
/// smallest unit (strike price decimals == strike asset decimals).
///
/// Example: 1 WBTC (1e8 raw) × 7,000 USDC strike (7_000_000_000 raw) / 10^8
/// = 7_000_000_000 raw USDC
pub fn calculate_strike_value(
    amount: u64,
    strike_price: u64,
    option_decimals: u8,
) -> Result<u64> {
    let scale = 10_u128
        .checked_pow(option_decimals as u32)
        .ok_or(ErrorCode::MathOverflow)?;

    let value = (amount as u128)
        .checked_mul(strike_price as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(scale)
        .ok_or(ErrorCode::MathOverflow)?;

    u64::try_from(value).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Calculates a pro-rata share of a pool balance:
/// payout = floor(pool_balance × share / total_shares)
///
/// Returns 0 if the pool is empty.
/// Errors if total_shares is 0, since nobody can hold a share of nothing.
pub fn calculate_pro_rata_share(
    pool_balance: u64,
    share: u64,
    total_shares: u64,
) -> Result<u64> {
    require!(total_shares > 0, ErrorCode::NoWithdrawableBalance);
    require!(share <= total_shares, ErrorCode::MathOverflow);

    if pool_balance == 0 {
        return Ok(0);
    }

    let payout = (pool_balance as u128)
        .checked_mul(share as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(total_shares as u128)
        .ok_or(ErrorCode::MathOverflow)?;

    // share <= total_shares keeps payout <= pool_balance
    Ok(payout as u64)
}
