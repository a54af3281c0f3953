//! Asset movement policy for a vault.
//!
//! The ledger in [`crate::state::CollateralVault`] never touches accounts
//! directly. Each operation drives a [`SettlementStrategy`] (collateral and
//! underlying pools) and an [`OptionTokens`] ledger (the option mint), both
//! bound to the signer of the current instruction. On chain both are served
//! by [`spl::SplSettlement`]; tests use an in-memory chain.

use anchor_lang::prelude::*;

pub mod spl;

pub use spl::*;

/// Moves strike collateral and underlying between the signer and the vault
/// pools. Every method is fallible and a failure aborts the enclosing
/// operation.
pub trait SettlementStrategy {
    /// Pull `amount` strike collateral from the signer into the pool.
    fn deposit_collateral(&mut self, amount: u64) -> Result<()>;

    /// Send `amount` strike collateral from the pool to the signer.
    fn release_collateral(&mut self, amount: u64) -> Result<()>;

    /// Pull `amount` underlying from the signer into the pool.
    fn deposit_underlying(&mut self, amount: u64) -> Result<()>;

    /// Send `amount` underlying from the pool to the signer.
    fn release_underlying(&mut self, amount: u64) -> Result<()>;

    /// Live strike pool balance, including any passive accrual. Read at the
    /// moment of use, never cached by the vault.
    fn current_collateral_balance(&mut self) -> Result<u64>;

    /// Live underlying pool balance.
    fn current_underlying_balance(&mut self) -> Result<u64>;
}

/// The transferable option token as seen by the signer.
pub trait OptionTokens {
    /// Option units held by the signer.
    fn holder_balance(&self) -> Result<u64>;

    /// Mint `amount` option units to the signer.
    fn issue(&mut self, amount: u64) -> Result<()>;

    /// Burn `amount` option units from the signer.
    fn retire(&mut self, amount: u64) -> Result<()>;
}
