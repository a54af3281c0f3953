//! In-memory chain for exercising [`CollateralVault`] without a validator.
//!
//! Balances, SPL-style allowances and lamports live in a [`Ledger`]. Every
//! vault operation runs inside [`SimulatedChain::transact`], which snapshots
//! the whole world and restores it on error, the way a failed Solana
//! transaction leaves no trace.

use std::collections::HashMap;

use anchor_lang::error::{Error, ERROR_CODE_OFFSET};
use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::settlement::{OptionTokens, SettlementStrategy};
use crate::state::{
    CollateralVault, SeriesParameters, SettlementKind, WithdrawalPayout, WriterPosition,
};

pub const CREATION_SLOT: u64 = 0;
pub const EXPIRATION_SLOT: u64 = 300;

pub fn key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

/// Anchor error number a failed operation returned.
pub fn error_code<T: std::fmt::Debug>(result: Result<T>) -> u32 {
    match result.expect_err("operation should have failed") {
        Error::AnchorError(error) => error.error_code_number,
        other => panic!("unexpected program error: {other:?}"),
    }
}

pub fn code(error: ErrorCode) -> u32 {
    error as u32 + ERROR_CODE_OFFSET
}

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    pub strike: HashMap<Pubkey, u64>,
    pub underlying: HashMap<Pubkey, u64>,
    pub options: HashMap<Pubkey, u64>,
    pub lamports: HashMap<Pubkey, u64>,
    pub strike_allowance: HashMap<Pubkey, u64>,
    pub underlying_allowance: HashMap<Pubkey, u64>,
    pub strike_pool: u64,
    pub underlying_pool: u64,
}

fn balance(map: &HashMap<Pubkey, u64>, owner: &Pubkey) -> u64 {
    map.get(owner).copied().unwrap_or(0)
}

fn debit(map: &mut HashMap<Pubkey, u64>, owner: &Pubkey, amount: u64) -> Result<()> {
    let entry = map.entry(*owner).or_insert(0);
    *entry = entry
        .checked_sub(amount)
        .ok_or_else(|| error!(ErrorCode::InsufficientBalance))?;
    Ok(())
}

fn credit(map: &mut HashMap<Pubkey, u64>, owner: &Pubkey, amount: u64) {
    *map.entry(*owner).or_insert(0) += amount;
}

/// Spends `amount` of an allowance; `u64::MAX` is treated as unlimited.
fn spend_allowance(map: &mut HashMap<Pubkey, u64>, owner: &Pubkey, amount: u64) -> Result<()> {
    let allowance = map.entry(*owner).or_insert(0);
    require!(*allowance >= amount, ErrorCode::InsufficientAllowance);
    if *allowance != u64::MAX {
        *allowance -= amount;
    }
    Ok(())
}

/// The ledger seen through one signer, as a settlement strategy.
pub struct Caller<'a> {
    kind: SettlementKind,
    signer: Pubkey,
    ledger: &'a mut Ledger,
}

impl SettlementStrategy for Caller<'_> {
    fn deposit_collateral(&mut self, amount: u64) -> Result<()> {
        require!(
            balance(&self.ledger.strike, &self.signer) >= amount,
            ErrorCode::InsufficientBalance
        );
        spend_allowance(&mut self.ledger.strike_allowance, &self.signer, amount)?;
        debit(&mut self.ledger.strike, &self.signer, amount)?;
        self.ledger.strike_pool += amount;
        Ok(())
    }

    fn release_collateral(&mut self, amount: u64) -> Result<()> {
        self.ledger.strike_pool = self
            .ledger
            .strike_pool
            .checked_sub(amount)
            .ok_or_else(|| error!(ErrorCode::InsufficientCollateral))?;
        credit(&mut self.ledger.strike, &self.signer, amount);
        Ok(())
    }

    fn deposit_underlying(&mut self, amount: u64) -> Result<()> {
        if self.kind == SettlementKind::NativeWrapped {
            debit(&mut self.ledger.lamports, &self.signer, amount)?;
        } else {
            require!(
                balance(&self.ledger.underlying, &self.signer) >= amount,
                ErrorCode::InsufficientBalance
            );
            spend_allowance(&mut self.ledger.underlying_allowance, &self.signer, amount)?;
            debit(&mut self.ledger.underlying, &self.signer, amount)?;
        }
        self.ledger.underlying_pool += amount;
        Ok(())
    }

    fn release_underlying(&mut self, amount: u64) -> Result<()> {
        self.ledger.underlying_pool = self
            .ledger
            .underlying_pool
            .checked_sub(amount)
            .ok_or_else(|| error!(ErrorCode::InsufficientCollateral))?;
        if self.kind == SettlementKind::NativeWrapped {
            credit(&mut self.ledger.lamports, &self.signer, amount);
        } else {
            credit(&mut self.ledger.underlying, &self.signer, amount);
        }
        Ok(())
    }

    fn current_collateral_balance(&mut self) -> Result<u64> {
        Ok(self.ledger.strike_pool)
    }

    fn current_underlying_balance(&mut self) -> Result<u64> {
        Ok(self.ledger.underlying_pool)
    }
}

impl OptionTokens for Caller<'_> {
    fn holder_balance(&self) -> Result<u64> {
        Ok(balance(&self.ledger.options, &self.signer))
    }

    fn issue(&mut self, amount: u64) -> Result<()> {
        credit(&mut self.ledger.options, &self.signer, amount);
        Ok(())
    }

    fn retire(&mut self, amount: u64) -> Result<()> {
        debit(&mut self.ledger.options, &self.signer, amount)
    }
}

/// One vault plus the world around it.
pub struct SimulatedChain {
    pub kind: SettlementKind,
    pub slot: u64,
    pub vault: CollateralVault,
    pub positions: HashMap<Pubkey, WriterPosition>,
    pub ledger: Ledger,
}

impl SimulatedChain {
    pub fn new(
        kind: SettlementKind,
        underlying_decimals: u8,
        strike_decimals: u8,
        strike_price: u64,
    ) -> Self {
        let params = SeriesParameters::new(
            key(101),
            underlying_decimals,
            key(102),
            strike_decimals,
            strike_price,
            EXPIRATION_SLOT,
            CREATION_SLOT,
            kind,
        )
        .expect("valid series parameters");

        let vault = CollateralVault {
            creator: key(100),
            params,
            option_mint: key(103),
            strike_pool: key(104),
            underlying_pool: key(105),
            option_supply: 0,
            total_locked: 0,
            bump: 255,
        };

        Self {
            kind,
            slot: CREATION_SLOT,
            vault,
            positions: HashMap::new(),
            ledger: Ledger::default(),
        }
    }

    /// WBTC (8 decimals) / aUSDC (6 decimals) put struck at 7,000
    pub fn wbtc_usdc(kind: SettlementKind) -> Self {
        Self::new(kind, 8, 6, 7_000_000_000)
    }

    /// SOL (9 decimals, native) / USDC put struck at 150
    pub fn sol_usdc_native() -> Self {
        Self::new(SettlementKind::NativeWrapped, 9, 6, 150_000_000)
    }

    // === WORLD SETUP ===

    pub fn fund_strike(&mut self, owner: Pubkey, amount: u64) {
        credit(&mut self.ledger.strike, &owner, amount);
    }

    pub fn approve_strike(&mut self, owner: Pubkey, amount: u64) {
        self.ledger.strike_allowance.insert(owner, amount);
    }

    pub fn fund_underlying(&mut self, owner: Pubkey, amount: u64) {
        credit(&mut self.ledger.underlying, &owner, amount);
    }

    pub fn approve_underlying(&mut self, owner: Pubkey, amount: u64) {
        self.ledger.underlying_allowance.insert(owner, amount);
    }

    pub fn fund_lamports(&mut self, owner: Pubkey, amount: u64) {
        credit(&mut self.ledger.lamports, &owner, amount);
    }

    /// Funds and approves exactly the collateral `amount` options need.
    pub fn prepare_writer(&mut self, writer: Pubkey, amount: u64) -> u64 {
        let collateral = self.vault.params.strike_value(amount).unwrap();
        self.fund_strike(writer, collateral);
        self.approve_strike(writer, u64::MAX);
        collateral
    }

    /// Plain token transfer of option units; the collateral claim stays put.
    pub fn transfer_options(&mut self, from: Pubkey, to: Pubkey, amount: u64) {
        debit(&mut self.ledger.options, &from, amount).expect("sender holds the options");
        credit(&mut self.ledger.options, &to, amount);
    }

    /// External interest credited straight to the strike pool.
    pub fn accrue_yield(&mut self, bps: u64) {
        assert_eq!(self.kind, SettlementKind::YieldBearing);
        self.ledger.strike_pool += self.ledger.strike_pool * bps / 10_000;
    }

    pub fn advance_to(&mut self, slot: u64) {
        assert!(slot >= self.slot, "slots never go backwards");
        self.slot = slot;
    }

    pub fn expire(&mut self) {
        self.advance_to(self.vault.expiration_checkpoint());
    }

    // === READS ===

    pub fn strike_of(&self, owner: &Pubkey) -> u64 {
        balance(&self.ledger.strike, owner)
    }

    pub fn underlying_of(&self, owner: &Pubkey) -> u64 {
        balance(&self.ledger.underlying, owner)
    }

    pub fn options_of(&self, owner: &Pubkey) -> u64 {
        balance(&self.ledger.options, owner)
    }

    pub fn lamports_of(&self, owner: &Pubkey) -> u64 {
        balance(&self.ledger.lamports, owner)
    }

    pub fn locked_of(&self, writer: &Pubkey) -> u64 {
        self.positions
            .get(writer)
            .map(|position| position.locked_collateral)
            .unwrap_or(0)
    }

    pub fn strike_pool(&self) -> u64 {
        self.ledger.strike_pool
    }

    pub fn underlying_pool(&self) -> u64 {
        self.ledger.underlying_pool
    }

    // === OPERATIONS ===

    pub fn mint(&mut self, writer: Pubkey, amount: u64) -> Result<u64> {
        self.transact(writer, |vault, position, io, slot| {
            vault.mint(position, amount, slot, io)
        })
    }

    pub fn exercise(&mut self, holder: Pubkey, amount: u64) -> Result<u64> {
        self.transact(holder, |vault, _, io, slot| vault.exercise(amount, slot, io))
    }

    pub fn burn(&mut self, writer: Pubkey, amount: u64) -> Result<u64> {
        self.transact(writer, |vault, position, io, slot| {
            vault.burn(position, amount, slot, io)
        })
    }

    pub fn withdraw(&mut self, writer: Pubkey) -> Result<WithdrawalPayout> {
        self.transact(writer, |vault, position, io, slot| {
            vault.withdraw(position, slot, io)
        })
    }

    /// Runs one operation for `signer` with all-or-nothing semantics.
    fn transact<T>(
        &mut self,
        signer: Pubkey,
        operation: impl FnOnce(&mut CollateralVault, &mut WriterPosition, &mut Caller, u64) -> Result<T>,
    ) -> Result<T> {
        let vault_before = self.vault.clone();
        let ledger_before = self.ledger.clone();

        let mut position = self.positions.get(&signer).cloned().unwrap_or(WriterPosition {
            vault: key(0),
            writer: signer,
            locked_collateral: 0,
            bump: 0,
        });

        let mut caller = Caller {
            kind: self.kind,
            signer,
            ledger: &mut self.ledger,
        };

        match operation(&mut self.vault, &mut position, &mut caller, self.slot) {
            Ok(value) => {
                if position.has_claim() || self.positions.contains_key(&signer) {
                    self.positions.insert(signer, position);
                }
                Ok(value)
            }
            Err(error) => {
                self.vault = vault_before;
                self.ledger = ledger_before;
                Err(error)
            }
        }
    }
}
