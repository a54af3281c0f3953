use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::utils::math::calculate_strike_value;
use crate::utils::validation::{validate_expiration, validate_strike_price};

/// How collateral and underlying move in and out of a vault.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementKind {
    /// Plain SPL collateral, moved 1:1
    Standard,
    /// Collateral whose pool balance grows outside the program
    YieldBearing,
    /// Underlying is native SOL, wrapped at the pool boundary
    NativeWrapped,
}

impl SettlementKind {
    pub fn seed_byte(&self) -> u8 {
        match self {
            SettlementKind::Standard => 0,
            SettlementKind::YieldBearing => 1,
            SettlementKind::NativeWrapped => 2,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    Expired,
}

/// Immutable description of one put series
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SeriesParameters {
    pub underlying_mint: Pubkey,      // Asset delivered on exercise
    pub strike_mint: Pubkey,          // Collateral / payout asset
    pub strike_price: u64,            // Strike asset units per whole underlying
    pub strike_price_decimals: u8,    // == strike asset decimals
    pub underlying_decimals: u8,
    pub option_decimals: u8,          // == underlying decimals
    pub expiration_slot: u64,         // Expired once slot >= this
    pub kind: SettlementKind,
}

impl SeriesParameters {
    pub const SIZE: usize = 32 + 32 + 8 + 1 + 1 + 1 + 8 + 1;

    /// Builds validated parameters. The option token always inherits the
    /// underlying's precision and the strike price is quoted in the strike
    /// asset's precision.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        underlying_mint: Pubkey,
        underlying_decimals: u8,
        strike_mint: Pubkey,
        strike_decimals: u8,
        strike_price: u64,
        expiration_slot: u64,
        current_slot: u64,
        kind: SettlementKind,
    ) -> Result<Self> {
        validate_strike_price(strike_price)?;
        validate_expiration(expiration_slot, current_slot)?;
        // 10^decimals must fit the u128 conversion path
        require!(underlying_decimals <= 38, ErrorCode::InvalidDecimals);

        Ok(Self {
            underlying_mint,
            strike_mint,
            strike_price,
            strike_price_decimals: strike_decimals,
            underlying_decimals,
            option_decimals: underlying_decimals,
            expiration_slot,
            kind,
        })
    }

    pub fn phase(&self, current_slot: u64) -> Phase {
        if current_slot >= self.expiration_slot {
            Phase::Expired
        } else {
            Phase::Active
        }
    }

    pub fn require_active(&self, current_slot: u64) -> Result<()> {
        require!(
            self.phase(current_slot) == Phase::Active,
            ErrorCode::OptionExpired
        );
        Ok(())
    }

    pub fn require_expired(&self, current_slot: u64) -> Result<()> {
        require!(
            self.phase(current_slot) == Phase::Expired,
            ErrorCode::OptionNotExpired
        );
        Ok(())
    }

    /// Strike-asset value of `amount` option units (collateral to lock on
    /// mint, refund on burn, payout on exercise).
    pub fn strike_value(&self, amount: u64) -> Result<u64> {
        calculate_strike_value(amount, self.strike_price, self.option_decimals)
    }
}
