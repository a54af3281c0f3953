use anchor_lang::prelude::*;

pub const SERIES_SEED: &[u8] = b"series";
pub const OPTION_MINT_SEED: &[u8] = b"option_mint";
pub const STRIKE_POOL_SEED: &[u8] = b"strike_pool";
pub const UNDERLYING_POOL_SEED: &[u8] = b"underlying_pool";
pub const WRITER_SEED: &[u8] = b"writer";

/// Wrapped SOL mint, the only underlying accepted by native-wrapped series.
pub const NATIVE_MINT: Pubkey =
    pubkey!("So11111111111111111111111111111111111111112");
