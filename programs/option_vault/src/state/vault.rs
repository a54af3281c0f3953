use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::settlement::{OptionTokens, SettlementStrategy};
use crate::state::{Phase, SeriesParameters, WriterPosition};
use crate::utils::math::calculate_pro_rata_share;
use crate::utils::validation::{
    validate_holder_balance, validate_nonzero_value, validate_vault_balance,
};

/// One option series: parameters, option supply and the running total of
/// every writer's locked collateral.
///
/// PDA Seeds: see [`crate::utils::SeriesSeeds`]
///
/// Pool balances are not stored here. They are the balances of the vault
/// owned `strike_pool` / `underlying_pool` token accounts and are read
/// through the settlement strategy whenever an operation needs them.
#[account]
pub struct CollateralVault {
    pub creator: Pubkey,
    pub params: SeriesParameters,

    // === DERIVED ADDRESSES ===
    pub option_mint: Pubkey,
    pub strike_pool: Pubkey,
    pub underlying_pool: Pubkey,

    // === RUNTIME DATA ===
    pub option_supply: u64,           // Outstanding option units
    pub total_locked: u64,            // Sum of all WriterPosition.locked_collateral
    pub bump: u8,
}

/// Amounts paid to a writer by [`CollateralVault::withdraw`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalPayout {
    pub share: u64,
    pub strike_amount: u64,
    pub underlying_amount: u64,
}

impl CollateralVault {
    pub const SIZE: usize = 8 + 32 + SeriesParameters::SIZE + 32 + 32 + 32 + 8 + 8 + 1;

    // === READ ACCESSORS ===

    pub fn expiration_checkpoint(&self) -> u64 {
        self.params.expiration_slot
    }

    /// Option token decimals, always the underlying's
    pub fn decimals(&self) -> u8 {
        self.params.option_decimals
    }

    pub fn strike_asset_decimals(&self) -> u8 {
        self.params.strike_price_decimals
    }

    pub fn underlying_asset_decimals(&self) -> u8 {
        self.params.underlying_decimals
    }

    pub fn strike_price_decimals(&self) -> u8 {
        self.params.strike_price_decimals
    }

    pub fn phase(&self, current_slot: u64) -> Phase {
        self.params.phase(current_slot)
    }

    // === OPERATIONS ===
    //
    // Each operation validates and computes every new counter first, then
    // moves assets, then commits. Nothing is written if any step errors.

    /// Locks `floor(amount × strike / 10^decimals)` collateral from the
    /// writer and issues `amount` option units. Returns the collateral locked.
    pub fn mint<S>(
        &mut self,
        position: &mut WriterPosition,
        amount: u64,
        current_slot: u64,
        io: &mut S,
    ) -> Result<u64>
    where
        S: SettlementStrategy + OptionTokens,
    {
        self.params.require_active(current_slot)?;

        let collateral = self.params.strike_value(amount)?;
        validate_nonzero_value(collateral)?;

        let locked = position
            .locked_collateral
            .checked_add(collateral)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_locked = self
            .total_locked
            .checked_add(collateral)
            .ok_or(ErrorCode::MathOverflow)?;
        let option_supply = self
            .option_supply
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        io.deposit_collateral(collateral)?;
        io.issue(amount)?;

        position.locked_collateral = locked;
        self.total_locked = total_locked;
        self.option_supply = option_supply;

        Ok(collateral)
    }

    /// Burns `amount` option units against `amount` underlying and pays the
    /// strike value out of the pool. Writer positions are not touched: the
    /// strike→underlying conversion is shared by every remaining writer.
    /// Returns the strike payout.
    pub fn exercise<S>(&mut self, amount: u64, current_slot: u64, io: &mut S) -> Result<u64>
    where
        S: SettlementStrategy + OptionTokens,
    {
        self.params.require_active(current_slot)?;
        validate_holder_balance(io.holder_balance()?, amount)?;

        let payout = self.params.strike_value(amount)?;
        validate_nonzero_value(payout)?;
        validate_vault_balance(io.current_collateral_balance()?, payout)?;

        let option_supply = self
            .option_supply
            .checked_sub(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        io.retire(amount)?;
        io.deposit_underlying(amount)?;
        io.release_collateral(payout)?;

        self.option_supply = option_supply;

        Ok(payout)
    }

    /// Unwinds `amount` option units before expiration at the mint rate.
    /// Returns the collateral refunded.
    pub fn burn<S>(
        &mut self,
        position: &mut WriterPosition,
        amount: u64,
        current_slot: u64,
        io: &mut S,
    ) -> Result<u64>
    where
        S: SettlementStrategy + OptionTokens,
    {
        self.params.require_active(current_slot)?;
        validate_holder_balance(io.holder_balance()?, amount)?;

        let refund = self.params.strike_value(amount)?;
        validate_nonzero_value(refund)?;

        let locked = position
            .locked_collateral
            .checked_sub(refund)
            .ok_or(ErrorCode::InsufficientLockedCollateral)?;
        let total_locked = self
            .total_locked
            .checked_sub(refund)
            .ok_or(ErrorCode::MathOverflow)?;
        let option_supply = self
            .option_supply
            .checked_sub(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        validate_vault_balance(io.current_collateral_balance()?, refund)?;

        io.retire(amount)?;
        io.release_collateral(refund)?;

        position.locked_collateral = locked;
        self.total_locked = total_locked;
        self.option_supply = option_supply;

        Ok(refund)
    }

    /// Settles a writer's whole claim after expiration:
    ///
    /// ```text
    /// strike_owed     = floor(strike_pool     × share / total_locked)
    /// underlying_owed = floor(underlying_pool × share / total_locked)
    /// ```
    ///
    /// Both pools are read at call time, so accrual between withdrawals is
    /// shared by whoever withdraws later. The last writer's share equals
    /// `total_locked` and drains both pools.
    pub fn withdraw<S>(
        &mut self,
        position: &mut WriterPosition,
        current_slot: u64,
        io: &mut S,
    ) -> Result<WithdrawalPayout>
    where
        S: SettlementStrategy,
    {
        self.params.require_expired(current_slot)?;

        require!(position.has_claim(), ErrorCode::NoWithdrawableBalance);
        let share = position.locked_collateral;

        let strike_pool = io.current_collateral_balance()?;
        let underlying_pool = io.current_underlying_balance()?;

        let strike_amount = calculate_pro_rata_share(strike_pool, share, self.total_locked)?;
        let underlying_amount =
            calculate_pro_rata_share(underlying_pool, share, self.total_locked)?;

        let total_locked = self
            .total_locked
            .checked_sub(share)
            .ok_or(ErrorCode::MathOverflow)?;

        if strike_amount > 0 {
            io.release_collateral(strike_amount)?;
        }
        if underlying_amount > 0 {
            io.release_underlying(underlying_amount)?;
        }

        self.total_locked = total_locked;
        position.locked_collateral = 0;

        Ok(WithdrawalPayout {
            share,
            strike_amount,
            underlying_amount,
        })
    }
}
