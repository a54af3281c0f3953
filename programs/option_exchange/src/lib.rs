use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("3qmaAy4tHLBTGXLKhQaChT4yqV2XhgmedLwQj116DDyS");

#[program]
pub mod option_exchange {
    use super::*;

    pub fn create_market(ctx: Context<CreateMarket>) -> Result<()> {
        instructions::create_market::handler(ctx)
    }

    pub fn place_order(
        ctx: Context<PlaceOrder>,
        price: u64,
        size: u64,
        is_buy: bool,
    ) -> Result<()> {
        instructions::place_order::handler(ctx, price, size, is_buy)
    }

    pub fn cancel_order(ctx: Context<CancelOrder>) -> Result<()> {
        instructions::cancel_order::handler(ctx)
    }

    pub fn fill_order(ctx: Context<FillOrder>, fill_size: u64) -> Result<()> {
        instructions::fill_order::handler(ctx, fill_size)
    }

    /// Mints options against the vault and sells them into a resting buy
    /// order, failing unless at least `min_output` quote arrives by `deadline`
    pub fn sell_options(
        ctx: Context<SellOptions>,
        amount: u64,
        min_output: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::sell_options::handler(ctx, amount, min_output, deadline)
    }
}
