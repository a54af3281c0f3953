use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::errors::ErrorCode;
use crate::state::market::Market;
use crate::state::order::Order;

#[derive(Accounts)]
pub struct FillOrder<'info> {
    #[account(mut)]
    pub taker: Signer<'info>,

    #[account(mut)]
    pub market: Account<'info, Market>,

    #[account(mut, constraint = maker_order.market == market.key() @ ErrorCode::InvalidMarket)]
    pub maker_order: Account<'info, Order>,

    #[account(constraint = base_mint.key() == market.base_mint @ ErrorCode::InvalidMint)]
    pub base_mint: InterfaceAccount<'info, Mint>,

    #[account(constraint = quote_mint.key() == market.quote_mint @ ErrorCode::InvalidMint)]
    pub quote_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [b"escrow", maker_order.key().as_ref()],
        bump
    )]
    pub maker_escrow: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, token::mint = base_mint)]
    pub taker_base_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, token::mint = quote_mint)]
    pub taker_quote_account: InterfaceAccount<'info, TokenAccount>,

    /// Receives base on a buy order, quote on a sell order
    #[account(
        mut,
        constraint = maker_receive_account.owner == maker_order.owner @ ErrorCode::UnauthorizedAccess
    )]
    pub maker_receive_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Moves `amount` out of an order's escrow; the order PDA signs.
#[allow(clippy::too_many_arguments)]
pub(crate) fn release_from_escrow<'info>(
    order: &Order,
    order_info: AccountInfo<'info>,
    escrow: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    let order_id_bytes = order.order_id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        b"order",
        order.market.as_ref(),
        order_id_bytes.as_ref(),
        &[order.bump],
    ]];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: escrow,
                mint,
                to,
                authority: order_info,
            },
            signer_seeds,
        ),
        amount,
        decimals,
    )
}

pub fn handler(ctx: Context<FillOrder>, fill_size: u64) -> Result<()> {
    let order = &ctx.accounts.maker_order;
    require!(fill_size > 0, ErrorCode::InvalidAmount);
    require!(fill_size <= order.remaining(), ErrorCode::InvalidFillSize);

    let base_decimals = ctx.accounts.base_mint.decimals;
    let quote_decimals = ctx.accounts.quote_mint.decimals;
    let quote_amount = ctx.accounts.market.quote_amount(order.price, fill_size)?;

    if order.is_buy {
        // Maker buying: taker gives options, receives quote from escrow
        require!(
            ctx.accounts.maker_receive_account.mint == ctx.accounts.base_mint.key(),
            ErrorCode::InvalidMint
        );

        token_interface::transfer_checked(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.taker_base_account.to_account_info(),
                    mint: ctx.accounts.base_mint.to_account_info(),
                    to: ctx.accounts.maker_receive_account.to_account_info(),
                    authority: ctx.accounts.taker.to_account_info(),
                },
            ),
            fill_size,
            base_decimals,
        )?;

        release_from_escrow(
            order,
            ctx.accounts.maker_order.to_account_info(),
            ctx.accounts.maker_escrow.to_account_info(),
            ctx.accounts.quote_mint.to_account_info(),
            ctx.accounts.taker_quote_account.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            quote_amount,
            quote_decimals,
        )?;
    } else {
        // Maker selling: taker receives options from escrow, gives quote
        require!(
            ctx.accounts.maker_receive_account.mint == ctx.accounts.quote_mint.key(),
            ErrorCode::InvalidMint
        );

        release_from_escrow(
            order,
            ctx.accounts.maker_order.to_account_info(),
            ctx.accounts.maker_escrow.to_account_info(),
            ctx.accounts.base_mint.to_account_info(),
            ctx.accounts.taker_base_account.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            fill_size,
            base_decimals,
        )?;

        token_interface::transfer_checked(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.taker_quote_account.to_account_info(),
                    mint: ctx.accounts.quote_mint.to_account_info(),
                    to: ctx.accounts.maker_receive_account.to_account_info(),
                    authority: ctx.accounts.taker.to_account_info(),
                },
            ),
            quote_amount,
            quote_decimals,
        )?;
    }

    let completed = ctx.accounts.maker_order.apply_fill(fill_size)?;
    ctx.accounts
        .market
        .record_fill(fill_size, quote_amount, completed)?;

    msg!(
        "Filled {} @ price {} for {} quote",
        fill_size,
        ctx.accounts.maker_order.price,
        quote_amount
    );

    Ok(())
}
