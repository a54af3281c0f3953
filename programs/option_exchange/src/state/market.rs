use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// A venue for one option series' tokens against a quote (output) token.
///
/// PDA Seeds: ["market", option_mint, quote_mint]
#[account]
pub struct Market {
    /// Option vault whose tokens trade here
    pub vault: Pubkey,

    /// Base token mint: always the vault's option mint
    pub base_mint: Pubkey,

    /// Quote token mint (e.g., USDC, wrapped SOL)
    pub quote_mint: Pubkey,

    /// Option token decimals; prices are quoted per 10^base_decimals units
    pub base_decimals: u8,

    /// PDA bump
    pub bump: u8,

    /// Counter for generating unique order IDs
    pub next_order_id: u64,

    /// Market statistics
    pub total_orders_placed: u64,
    pub total_orders_filled: u64,
    pub total_base_volume: u64,
    pub total_quote_volume: u64,
}

impl Market {
    pub const SIZE: usize = 8 + 32 + 32 + 32 + 1 + 1 + 8 + 8 + 8 + 8 + 8;

    /// Quote units owed for `size` base units at `price`, rounded down
    pub fn quote_amount(&self, price: u64, size: u64) -> Result<u64> {
        let scale = 10u128
            .checked_pow(self.base_decimals as u32)
            .ok_or(ErrorCode::MathOverflow)?;
        let quote = (price as u128)
            .checked_mul(size as u128)
            .ok_or(ErrorCode::MathOverflow)?
            / scale;
        u64::try_from(quote).map_err(|_| error!(ErrorCode::MathOverflow))
    }

    /// Escrow a new order must deposit, after checking its side against
    /// the deposited mint: sells lock option units 1:1, buys lock the full
    /// quote cost up front.
    pub fn escrow_for_order(
        &self,
        is_buy: bool,
        deposit_mint: Pubkey,
        price: u64,
        size: u64,
    ) -> Result<u64> {
        require!(price > 0, ErrorCode::InvalidPrice);
        require!(size > 0, ErrorCode::InvalidAmount);

        let expected_mint = if is_buy { self.quote_mint } else { self.base_mint };
        require_keys_eq!(deposit_mint, expected_mint, ErrorCode::InvalidMint);

        let escrow = if is_buy {
            self.quote_amount(price, size)?
        } else {
            size
        };
        // a bid too small to pay anything would take options for free
        require!(escrow > 0, ErrorCode::InvalidAmount);
        Ok(escrow)
    }

    /// Hands out the next order id and counts the placement
    pub fn register_order(&mut self) -> Result<u64> {
        let order_id = self.next_order_id;
        self.next_order_id = order_id.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        self.total_orders_placed = self
            .total_orders_placed
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(order_id)
    }

    /// Books one fill into the running statistics
    pub fn record_fill(&mut self, base: u64, quote: u64, order_completed: bool) -> Result<()> {
        self.total_base_volume = self
            .total_base_volume
            .checked_add(base)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_quote_volume = self
            .total_quote_volume
            .checked_add(quote)
            .ok_or(ErrorCode::MathOverflow)?;
        if order_completed {
            self.total_orders_filled = self
                .total_orders_filled
                .checked_add(1)
                .ok_or(ErrorCode::MathOverflow)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(base_decimals: u8) -> Market {
        Market {
            vault: Pubkey::new_from_array([1; 32]),
            base_mint: Pubkey::new_from_array([2; 32]),
            quote_mint: Pubkey::new_from_array([3; 32]),
            base_decimals,
            bump: 255,
            next_order_id: 0,
            total_orders_placed: 0,
            total_orders_filled: 0,
            total_base_volume: 0,
            total_quote_volume: 0,
        }
    }

    #[test]
    fn test_quote_amount_scales_by_base_decimals() {
        // 1 WBTC put option at 250 USDC premium
        let market = market(8);
        assert_eq!(market.quote_amount(250_000_000, 100_000_000).unwrap(), 250_000_000);
        assert_eq!(market.quote_amount(250_000_000, 50_000_000).unwrap(), 125_000_000);
        // rounds down in the buyer's favour
        assert_eq!(market.quote_amount(250_000_000, 3).unwrap(), 7);
    }

    #[test]
    fn test_quote_amount_does_not_overflow_intermediate() {
        let market = market(9);
        assert_eq!(
            market.quote_amount(u64::MAX, 1_000_000_000).unwrap(),
            u64::MAX
        );
        assert!(self::market(0).quote_amount(u64::MAX, 2).is_err());
    }

    #[test]
    fn test_escrow_follows_order_side() {
        let market = market(8);
        let options = market.base_mint;
        let usdc = market.quote_mint;

        // ask for one whole option: one option deposited
        assert_eq!(
            market.escrow_for_order(false, options, 250_000_000, 100_000_000).unwrap(),
            100_000_000
        );
        // bid for half an option at 250: 125 USDC deposited
        assert_eq!(
            market.escrow_for_order(true, usdc, 250_000_000, 50_000_000).unwrap(),
            125_000_000
        );
    }

    #[test]
    fn test_escrow_rejects_wrong_mint_and_empty_orders() {
        let market = market(8);
        let options = market.base_mint;
        let usdc = market.quote_mint;

        assert!(market.escrow_for_order(true, options, 250_000_000, 100).is_err());
        assert!(market.escrow_for_order(false, usdc, 250_000_000, 100).is_err());
        assert!(market.escrow_for_order(true, usdc, 0, 100).is_err());
        assert!(market.escrow_for_order(false, options, 250_000_000, 0).is_err());
        // 3 units at a price of 1 per whole option rounds to nothing
        assert!(market.escrow_for_order(true, usdc, 1, 3).is_err());
    }

    #[test]
    fn test_register_order_issues_sequential_ids() {
        let mut market = market(8);
        assert_eq!(market.register_order().unwrap(), 0);
        assert_eq!(market.register_order().unwrap(), 1);
        assert_eq!(market.next_order_id, 2);
        assert_eq!(market.total_orders_placed, 2);
    }

    #[test]
    fn test_record_fill_counts_completed_orders_once() {
        let mut market = market(8);
        market.record_fill(40, 100, false).unwrap();
        market.record_fill(60, 150, true).unwrap();

        assert_eq!(market.total_base_volume, 100);
        assert_eq!(market.total_quote_volume, 250);
        assert_eq!(market.total_orders_filled, 1);
    }
}
