use anchor_lang::prelude::*;

use crate::events::OptionsMinted;
use crate::instructions::WriterContext;

/// Locks strike collateral from the writer and mints option tokens.
/// The collateral claim is recorded on the writer's position.
pub fn handler(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
    let current_slot = Clock::get()?.slot;
    let mut io = ctx.accounts.settlement();

    let vault_key = ctx.accounts.vault.key();
    let writer = ctx.accounts.user.key();
    ctx.accounts
        .writer_position
        .bind(vault_key, writer, ctx.bumps.writer_position);

    let collateral = ctx.accounts.vault.mint(
        &mut ctx.accounts.writer_position,
        amount,
        current_slot,
        &mut io,
    )?;

    let vault = &ctx.accounts.vault;
    msg!(
        "Minted {} options for {} locking {} collateral. Total supply: {}",
        amount,
        writer,
        collateral,
        vault.option_supply
    );

    emit!(OptionsMinted {
        vault: vault_key,
        writer,
        amount,
        collateral,
        option_supply: vault.option_supply,
        total_locked: vault.total_locked,
    });

    Ok(())
}
