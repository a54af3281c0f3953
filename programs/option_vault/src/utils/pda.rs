use anchor_lang::prelude::*;

use crate::constants::SERIES_SEED;
use crate::state::SeriesParameters;

/// Owned copy of the seeds that derive a CollateralVault address.
///
/// Seeds:
/// - "series"
/// - underlying_mint
/// - strike_mint
/// - strike_price (le bytes)
/// - expiration_slot (le bytes)
/// - settlement kind
/// - bump
///
/// The vault PDA is the mint authority of the option token and the owner of
/// both pools, so every release and every option issue signs with these.
#[derive(Clone, Debug)]
pub struct SeriesSeeds {
    underlying_mint: [u8; 32],
    strike_mint: [u8; 32],
    strike_price: [u8; 8],
    expiration_slot: [u8; 8],
    kind: [u8; 1],
    bump: [u8; 1],
}

impl SeriesSeeds {
    pub fn new(params: &SeriesParameters, bump: u8) -> Self {
        Self {
            underlying_mint: params.underlying_mint.to_bytes(),
            strike_mint: params.strike_mint.to_bytes(),
            strike_price: params.strike_price.to_le_bytes(),
            expiration_slot: params.expiration_slot.to_le_bytes(),
            kind: [params.kind.seed_byte()],
            bump: [bump],
        }
    }

    pub fn as_seeds(&self) -> [&[u8]; 7] {
        [
            SERIES_SEED,
            &self.underlying_mint,
            &self.strike_mint,
            &self.strike_price,
            &self.expiration_slot,
            &self.kind,
            &self.bump,
        ]
    }
}
