use anchor_lang::prelude::*;

use crate::state::SeriesParameters;

/// Discovery event: index by `creator` to find every vault a wallet deployed.
#[event]
pub struct OptionCreated {
    pub creator: Pubkey,
    pub vault: Pubkey,
    pub params: SeriesParameters,
}

#[event]
pub struct OptionsMinted {
    pub vault: Pubkey,
    pub writer: Pubkey,
    pub amount: u64,
    pub collateral: u64,
    pub option_supply: u64,
    pub total_locked: u64,
}

#[event]
pub struct OptionsExercised {
    pub vault: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
    pub payout: u64,
    pub option_supply: u64,
}

#[event]
pub struct OptionsBurned {
    pub vault: Pubkey,
    pub writer: Pubkey,
    pub amount: u64,
    pub refund: u64,
    pub option_supply: u64,
    pub total_locked: u64,
}

#[event]
pub struct CollateralWithdrawn {
    pub vault: Pubkey,
    pub writer: Pubkey,
    pub share: u64,
    pub strike_amount: u64,
    pub underlying_amount: u64,
    pub total_locked: u64,
}
