use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    self, CloseAccount, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::ErrorCode;
use crate::state::order::Order;

#[derive(Accounts)]
pub struct CancelOrder<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        close = user,
        constraint = order.owner == user.key() @ ErrorCode::UnauthorizedAccess
    )]
    pub order: Account<'info, Order>,

    #[account(constraint = return_mint.key() == escrow.mint @ ErrorCode::InvalidMint)]
    pub return_mint: InterfaceAccount<'info, Mint>,

    #[account(mut, token::mint = return_mint, token::authority = user)]
    pub user_return_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"escrow", order.key().as_ref()],
        bump
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<CancelOrder>) -> Result<()> {
    let order = &ctx.accounts.order;
    require!(order.remaining() > 0, ErrorCode::OrderFullyFilled);

    // The escrow is owned by the order PDA, which signs with its own seeds
    let order_id_bytes = order.order_id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        b"order",
        order.market.as_ref(),
        order_id_bytes.as_ref(),
        &[order.bump],
    ]];

    // Return escrowed tokens
    let refund = ctx.accounts.escrow.amount;
    if refund > 0 {
        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.escrow.to_account_info(),
                    mint: ctx.accounts.return_mint.to_account_info(),
                    to: ctx.accounts.user_return_account.to_account_info(),
                    authority: ctx.accounts.order.to_account_info(),
                },
                signer_seeds,
            ),
            refund,
            ctx.accounts.return_mint.decimals,
        )?;
    }

    token_interface::close_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        CloseAccount {
            account: ctx.accounts.escrow.to_account_info(),
            destination: ctx.accounts.user.to_account_info(),
            authority: ctx.accounts.order.to_account_info(),
        },
        signer_seeds,
    ))?;

    msg!(
        "Order {} cancelled, {} returned",
        ctx.accounts.order.order_id,
        refund
    );

    Ok(())
}
