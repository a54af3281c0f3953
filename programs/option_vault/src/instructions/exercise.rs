use anchor_lang::prelude::*;

use crate::events::OptionsExercised;
use crate::instructions::HolderContext;

/// Exercises puts: holder burns options and delivers underlying (lamports
/// for native series) → receives the strike value from the pool
pub fn handler(ctx: Context<HolderContext>, amount: u64) -> Result<()> {
    let current_slot = Clock::get()?.slot;
    let mut io = ctx.accounts.settlement();

    let payout = ctx.accounts.vault.exercise(amount, current_slot, &mut io)?;

    let vault = &ctx.accounts.vault;
    msg!(
        "Exercised {} options. Strike payout: {}. Remaining supply: {}",
        amount,
        payout,
        vault.option_supply
    );

    emit!(OptionsExercised {
        vault: vault.key(),
        holder: ctx.accounts.user.key(),
        amount,
        payout,
        option_supply: vault.option_supply,
    });

    Ok(())
}
