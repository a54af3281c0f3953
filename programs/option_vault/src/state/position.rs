use anchor_lang::prelude::*;

/// Residual collateral claim of one writer on one vault.
///
/// PDA Seeds: "writer", vault, writer
///
/// Keyed by the account that minted, not by whoever holds the option
/// tokens now: selling the tokens does not move the claim.
#[account]
pub struct WriterPosition {
    pub vault: Pubkey,
    pub writer: Pubkey,
    pub locked_collateral: u64,
    pub bump: u8,
}

impl WriterPosition {
    pub const SIZE: usize = 8 + 32 + 32 + 8 + 1;

    /// Stamps identity on a freshly created (zeroed) position. Idempotent.
    pub fn bind(&mut self, vault: Pubkey, writer: Pubkey, bump: u8) {
        self.vault = vault;
        self.writer = writer;
        self.bump = bump;
    }

    pub fn has_claim(&self) -> bool {
        self.locked_collateral > 0
    }
}
