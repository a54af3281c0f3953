use anchor_lang::prelude::*;

use crate::events::CollateralWithdrawn;
use crate::instructions::WriterContext;

/// Post-expiry: settles the writer's locked share against the current pools
/// (strike collateral plus any accrual, plus underlying from exercises).
/// Option tokens the writer still holds are left untouched.
pub fn handler(ctx: Context<WriterContext>) -> Result<()> {
    let current_slot = Clock::get()?.slot;
    let mut io = ctx.accounts.settlement();

    let vault_key = ctx.accounts.vault.key();
    let writer = ctx.accounts.user.key();
    ctx.accounts
        .writer_position
        .bind(vault_key, writer, ctx.bumps.writer_position);

    let payout = ctx.accounts.vault.withdraw(
        &mut ctx.accounts.writer_position,
        current_slot,
        &mut io,
    )?;

    let vault = &ctx.accounts.vault;
    msg!(
        "Withdrew share {}: {} strike, {} underlying. Remaining locked: {}",
        payout.share,
        payout.strike_amount,
        payout.underlying_amount,
        vault.total_locked
    );

    emit!(CollateralWithdrawn {
        vault: vault_key,
        writer,
        share: payout.share,
        strike_amount: payout.strike_amount,
        underlying_amount: payout.underlying_amount,
        total_locked: vault.total_locked,
    });

    Ok(())
}
