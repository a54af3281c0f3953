use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use option_vault::state::Phase;
use option_vault::CollateralVault;

use crate::errors::ErrorCode;
use crate::state::market::Market;
use crate::state::order::Order;

/// Rests a bid or an ask for one series' options. Only live series can be
/// quoted: once the vault expires its options can no longer be exercised
/// and neither side should lock funds against them.
#[derive(Accounts)]
pub struct PlaceOrder<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(mut, has_one = vault @ ErrorCode::InvalidMarket)]
    pub market: Account<'info, Market>,

    pub vault: Account<'info, CollateralVault>,

    #[account(
        init,
        payer = user,
        space = Order::SIZE,
        seeds = [
            b"order",
            market.key().as_ref(),
            market.next_order_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub order: Account<'info, Order>,

    /// Option mint for asks, quote mint for bids
    pub deposit_mint: InterfaceAccount<'info, Mint>,

    #[account(mut, token::mint = deposit_mint)]
    pub user_deposit_account: InterfaceAccount<'info, TokenAccount>,

    /// Order escrow, owned by the order PDA
    #[account(
        init,
        payer = user,
        seeds = [b"escrow", order.key().as_ref()],
        bump,
        token::mint = deposit_mint,
        token::authority = order,
        token::token_program = token_program,
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceOrder>, price: u64, size: u64, is_buy: bool) -> Result<()> {
    let clock = Clock::get()?;
    require!(
        ctx.accounts.vault.phase(clock.slot) == Phase::Active,
        ErrorCode::SeriesExpired
    );

    let escrow_amount = ctx.accounts.market.escrow_for_order(
        is_buy,
        ctx.accounts.deposit_mint.key(),
        price,
        size,
    )?;

    token_interface::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.user_deposit_account.to_account_info(),
                mint: ctx.accounts.deposit_mint.to_account_info(),
                to: ctx.accounts.escrow.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        escrow_amount,
        ctx.accounts.deposit_mint.decimals,
    )?;

    let market_key = ctx.accounts.market.key();
    let order_id = ctx.accounts.market.register_order()?;

    ctx.accounts.order.set_inner(Order {
        market: market_key,
        order_id,
        owner: ctx.accounts.user.key(),
        is_buy,
        price,
        size,
        filled: 0,
        bump: ctx.bumps.order,
        created_at: clock.unix_timestamp,
    });

    msg!(
        "Order {} on vault {}: {} {} options @ {}, escrowed {}",
        order_id,
        ctx.accounts.vault.key(),
        if is_buy { "BUY" } else { "SELL" },
        size,
        price,
        escrow_amount
    );

    Ok(())
}
