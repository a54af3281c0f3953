use anchor_lang::prelude::*;

use crate::constants::NATIVE_MINT;
use crate::errors::ErrorCode;
use crate::events::OptionCreated;
use crate::instructions::SeriesCreate;
use crate::state::{SeriesParameters, SettlementKind};

pub fn handler(
    ctx: Context<SeriesCreate>,
    strike_price: u64,
    expiration_slot: u64,
    kind: SettlementKind,
) -> Result<()> {
    let current_slot = Clock::get()?.slot;

    if kind == SettlementKind::NativeWrapped {
        require_keys_eq!(
            ctx.accounts.underlying_mint.key(),
            NATIVE_MINT,
            ErrorCode::InvalidUnderlyingMint
        );
    }

    let params = SeriesParameters::new(
        ctx.accounts.underlying_mint.key(),
        ctx.accounts.underlying_mint.decimals,
        ctx.accounts.strike_mint.key(),
        ctx.accounts.strike_mint.decimals,
        strike_price,
        expiration_slot,
        current_slot,
        kind,
    )?;
    require!(
        ctx.accounts.option_mint.decimals == params.option_decimals,
        ErrorCode::InvalidDecimals
    );

    let vault_key = ctx.accounts.vault.key();
    let vault = &mut ctx.accounts.vault;

    vault.creator = ctx.accounts.creator.key();
    vault.params = params.clone();

    // Mint and pools are already initialized by Anchor's init constraints
    vault.option_mint = ctx.accounts.option_mint.key();
    vault.strike_pool = ctx.accounts.strike_pool.key();
    vault.underlying_pool = ctx.accounts.underlying_pool.key();

    vault.option_supply = 0;
    vault.total_locked = 0;
    vault.bump = ctx.bumps.vault;

    msg!(
        "Created {:?} put series: {} @ {} (strike asset: {}) expiring at slot {}",
        kind,
        params.underlying_mint,
        strike_price,
        params.strike_mint,
        expiration_slot
    );
    msg!("Option mint: {}", vault.option_mint);

    emit!(OptionCreated {
        creator: vault.creator,
        vault: vault_key,
        params,
    });

    Ok(())
}
