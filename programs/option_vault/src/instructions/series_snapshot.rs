use anchor_lang::prelude::*;

use crate::instructions::SeriesView;
use crate::state::Phase;

/// Everything a client needs to price or settle against a series, returned
/// as instruction return data.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SeriesSnapshot {
    pub phase: Phase,
    pub strike_price: u64,
    pub strike_balance: u64,
    pub underlying_balance: u64,
    pub option_supply: u64,
    pub total_locked: u64,
    pub expiration_checkpoint: u64,
    pub decimals: u8,
    pub strike_asset_decimals: u8,
    pub underlying_asset_decimals: u8,
    pub strike_price_decimals: u8,
}

pub fn handler(ctx: Context<SeriesView>) -> Result<SeriesSnapshot> {
    let current_slot = Clock::get()?.slot;
    let vault = &ctx.accounts.vault;

    Ok(SeriesSnapshot {
        phase: vault.phase(current_slot),
        strike_price: vault.params.strike_price,
        strike_balance: ctx.accounts.strike_pool.amount,
        underlying_balance: ctx.accounts.underlying_pool.amount,
        option_supply: vault.option_supply,
        total_locked: vault.total_locked,
        expiration_checkpoint: vault.expiration_checkpoint(),
        decimals: vault.decimals(),
        strike_asset_decimals: vault.strike_asset_decimals(),
        underlying_asset_decimals: vault.underlying_asset_decimals(),
        strike_price_decimals: vault.strike_price_decimals(),
    })
}
