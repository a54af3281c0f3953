use anchor_lang::prelude::*;

use crate::events::OptionsBurned;
use crate::instructions::WriterContext;

/// Burns unexpired options to reclaim collateral at the mint rate
pub fn handler(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
    let current_slot = Clock::get()?.slot;
    let mut io = ctx.accounts.settlement();

    let vault_key = ctx.accounts.vault.key();
    let writer = ctx.accounts.user.key();
    ctx.accounts
        .writer_position
        .bind(vault_key, writer, ctx.bumps.writer_position);

    let refund = ctx.accounts.vault.burn(
        &mut ctx.accounts.writer_position,
        amount,
        current_slot,
        &mut io,
    )?;

    let vault = &ctx.accounts.vault;
    msg!(
        "Burned {} options. Refunded: {} collateral. New total supply: {}",
        amount,
        refund,
        vault.option_supply
    );

    emit!(OptionsBurned {
        vault: vault_key,
        writer,
        amount,
        refund,
        option_supply: vault.option_supply,
        total_locked: vault.total_locked,
    });

    Ok(())
}
