use anchor_lang::prelude::*;

/// Emitted when a writer mints and sells in a single `sell_options` call
#[event]
pub struct OptionsSold {
    pub seller: Pubkey,
    pub vault: Pubkey,
    pub amount: u64,
    pub output_mint: Pubkey,
    pub proceeds: u64,
}
