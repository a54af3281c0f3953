use anchor_lang::prelude::*;

use instructions::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod settlement;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export at crate root for Anchor's macro expansion
pub use instructions::{HolderContext, SeriesCreate, SeriesSnapshot, SeriesView, WriterContext};
pub use state::{CollateralVault, SeriesParameters, SettlementKind, WriterPosition};

declare_id!("fypMJa5UeoEmLP6jA7i8Vvf2iDzFA44m1mEkekXyGTu");

#[program]
pub mod option_vault {
    use super::*;

    /// CreateSeries: initializes CollateralVault + option mint + both pools
    /// and emits OptionCreated
    pub fn create_series(
        ctx: Context<SeriesCreate>,
        strike_price: u64,
        expiration_slot: u64,
        kind: SettlementKind,
    ) -> Result<()> {
        instructions::create_series::handler(ctx, strike_price, expiration_slot, kind)
    }

    /// Mint: lock strike collateral → receive option tokens
    pub fn mint_options(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
        instructions::mint_options::handler(ctx, amount)
    }

    /// Exercise: burn options + deliver underlying → receive strike value
    pub fn exercise(ctx: Context<HolderContext>, amount: u64) -> Result<()> {
        instructions::exercise::handler(ctx, amount)
    }

    /// Burn: burn unexpired options → reclaim collateral at the mint rate
    pub fn burn_options(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
        instructions::burn_options::handler(ctx, amount)
    }

    /// Withdraw: post-expiry pro-rata share of both pools, once per writer
    pub fn withdraw(ctx: Context<WriterContext>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Read accessors for a series, returned as return data
    pub fn series_snapshot(ctx: Context<SeriesView>) -> Result<SeriesSnapshot> {
        instructions::series_snapshot::handler(ctx)
    }
}
