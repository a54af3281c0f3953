use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// A single escrowed limit order on an option market
#[account]
pub struct Order {
    /// Market this order belongs to
    pub market: Pubkey,

    /// Unique order ID within the market
    pub order_id: u64,

    /// Order owner
    pub owner: Pubkey,

    /// Order side: true = buy options with quote, false = sell options for quote
    pub is_buy: bool,

    /// Price (quote units per whole option token)
    pub price: u64,

    /// Original order size (in option units)
    pub size: u64,

    /// Filled amount (in option units)
    pub filled: u64,

    /// PDA bump
    pub bump: u8,

    /// Creation timestamp
    pub created_at: i64,
}

impl Order {
    pub const SIZE: usize = 8 + 32 + 8 + 32 + 1 + 8 + 8 + 8 + 1 + 8;

    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.filled)
    }

    /// Validates `fill_size` against what is left and books it.
    /// Returns true once the order is completely filled.
    pub fn apply_fill(&mut self, fill_size: u64) -> Result<bool> {
        require!(fill_size > 0, ErrorCode::InvalidAmount);
        require!(fill_size <= self.remaining(), ErrorCode::InvalidFillSize);

        self.filled = self
            .filled
            .checked_add(fill_size)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(self.remaining() == 0)
    }
}
