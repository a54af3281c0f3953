use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::system_program;
use anchor_spl::token_interface::{self as token, TokenAccount};

use crate::errors::ErrorCode;
use crate::settlement::{OptionTokens, SettlementStrategy};
use crate::state::SettlementKind;
use crate::utils::pda::SeriesSeeds;
use crate::utils::validation::validate_holder_balance;

/// Raw accounts a settlement needs, taken from an instruction context.
///
/// `signer_*` accounts belong to (or are delegated to) the signer of the
/// instruction: deposits come from them and releases go to them.
pub struct SplAccounts<'info> {
    pub signer: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub strike_mint: AccountInfo<'info>,
    pub underlying_mint: AccountInfo<'info>,
    pub option_mint: AccountInfo<'info>,
    pub strike_pool: AccountInfo<'info>,
    pub underlying_pool: AccountInfo<'info>,
    pub signer_strike_account: AccountInfo<'info>,
    /// Absent only when the instruction never touches underlying tokens
    pub signer_underlying_account: Option<AccountInfo<'info>>,
    pub signer_option_account: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

/// SPL token implementation of [`SettlementStrategy`] and [`OptionTokens`].
///
/// One type serves all three settlement kinds; the kind only changes the
/// edges:
/// - `Standard`: every deposit must land 1:1 in the pool.
/// - `YieldBearing`: collateral deposits are not delta-checked, since share
///   based mints may round the credited amount. Pool balances are always
///   read live so passive accrual is included.
/// - `NativeWrapped`: underlying arrives as lamports and is synced into the
///   wrapped SOL pool; releases are unwrapped by closing the signer's
///   wrapped SOL account back to the signer.
pub struct SplSettlement<'info> {
    kind: SettlementKind,
    seeds: SeriesSeeds,
    strike_decimals: u8,
    underlying_decimals: u8,
    accounts: SplAccounts<'info>,
}

impl<'info> SplSettlement<'info> {
    pub fn new(
        kind: SettlementKind,
        seeds: SeriesSeeds,
        strike_decimals: u8,
        underlying_decimals: u8,
        accounts: SplAccounts<'info>,
    ) -> Self {
        Self {
            kind,
            seeds,
            strike_decimals,
            underlying_decimals,
            accounts,
        }
    }

    /// Checks that the signer may move `amount` out of `source`: it must
    /// hold the balance and either own the account or be its delegate with
    /// a large enough allowance.
    fn check_spendable(&self, source: &AccountInfo<'info>, amount: u64) -> Result<()> {
        let account = read_token_account(source)?;
        validate_holder_balance(account.amount, amount)?;

        let signer = self.accounts.signer.key();
        if account.owner != signer {
            require!(
                account.delegate == COption::Some(signer) && account.delegated_amount >= amount,
                ErrorCode::InsufficientAllowance
            );
        }
        Ok(())
    }

    /// Signer → pool transfer. Returns the amount the pool actually gained.
    fn pull(
        &self,
        from: &AccountInfo<'info>,
        mint: &AccountInfo<'info>,
        pool: &AccountInfo<'info>,
        decimals: u8,
        amount: u64,
    ) -> Result<u64> {
        self.check_spendable(from, amount)?;
        let before = token_amount(pool)?;

        token::transfer_checked(
            CpiContext::new(
                self.accounts.token_program.clone(),
                token::TransferChecked {
                    from: from.clone(),
                    mint: mint.clone(),
                    to: pool.clone(),
                    authority: self.accounts.signer.clone(),
                },
            ),
            amount,
            decimals,
        )?;

        let after = token_amount(pool)?;
        after
            .checked_sub(before)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Pool → signer transfer, signed by the vault PDA.
    fn push(
        &self,
        pool: &AccountInfo<'info>,
        mint: &AccountInfo<'info>,
        to: &AccountInfo<'info>,
        decimals: u8,
        amount: u64,
    ) -> Result<()> {
        let seeds = self.seeds.as_seeds();
        let signer_seeds: &[&[&[u8]]] = &[&seeds];

        token::transfer_checked(
            CpiContext::new_with_signer(
                self.accounts.token_program.clone(),
                token::TransferChecked {
                    from: pool.clone(),
                    mint: mint.clone(),
                    to: to.clone(),
                    authority: self.accounts.vault.clone(),
                },
                signer_seeds,
            ),
            amount,
            decimals,
        )
    }

    /// Lamports → wrapped SOL pool
    fn wrap_into_pool(&self, amount: u64) -> Result<()> {
        validate_holder_balance(self.accounts.signer.lamports(), amount)?;

        system_program::transfer(
            CpiContext::new(
                self.accounts.system_program.clone(),
                system_program::Transfer {
                    from: self.accounts.signer.clone(),
                    to: self.accounts.underlying_pool.clone(),
                },
            ),
            amount,
        )?;

        token::sync_native(CpiContext::new(
            self.accounts.token_program.clone(),
            token::SyncNative {
                account: self.accounts.underlying_pool.clone(),
            },
        ))
    }

    fn signer_underlying_account(&self) -> Result<&AccountInfo<'info>> {
        require_account(self.accounts.signer_underlying_account.as_ref())
    }

    /// Closes the signer's wrapped SOL account into the signer's wallet.
    fn unwrap_to_signer(&self) -> Result<()> {
        token::close_account(CpiContext::new(
            self.accounts.token_program.clone(),
            token::CloseAccount {
                account: self.signer_underlying_account()?.clone(),
                destination: self.accounts.signer.clone(),
                authority: self.accounts.signer.clone(),
            },
        ))
    }

    fn require_exact(received: u64, sent: u64) -> Result<()> {
        require!(received == sent, ErrorCode::TransferAmountMismatch);
        Ok(())
    }
}

impl<'info> SettlementStrategy for SplSettlement<'info> {
    fn deposit_collateral(&mut self, amount: u64) -> Result<()> {
        let received = self.pull(
            &self.accounts.signer_strike_account,
            &self.accounts.strike_mint,
            &self.accounts.strike_pool,
            self.strike_decimals,
            amount,
        )?;

        if self.kind != SettlementKind::YieldBearing {
            Self::require_exact(received, amount)?;
        }
        Ok(())
    }

    fn release_collateral(&mut self, amount: u64) -> Result<()> {
        self.push(
            &self.accounts.strike_pool,
            &self.accounts.strike_mint,
            &self.accounts.signer_strike_account,
            self.strike_decimals,
            amount,
        )
    }

    fn deposit_underlying(&mut self, amount: u64) -> Result<()> {
        match self.kind {
            SettlementKind::NativeWrapped => self.wrap_into_pool(amount),
            SettlementKind::Standard | SettlementKind::YieldBearing => {
                let received = self.pull(
                    self.signer_underlying_account()?,
                    &self.accounts.underlying_mint,
                    &self.accounts.underlying_pool,
                    self.underlying_decimals,
                    amount,
                )?;
                Self::require_exact(received, amount)
            }
        }
    }

    fn release_underlying(&mut self, amount: u64) -> Result<()> {
        let destination_info = self.signer_underlying_account()?;
        if self.kind == SettlementKind::NativeWrapped {
            let destination = read_token_account(destination_info)?;
            require!(
                destination.owner == self.accounts.signer.key(),
                ErrorCode::InvalidTokenAccount
            );
        }

        self.push(
            &self.accounts.underlying_pool,
            &self.accounts.underlying_mint,
            destination_info,
            self.underlying_decimals,
            amount,
        )?;

        if self.kind == SettlementKind::NativeWrapped {
            self.unwrap_to_signer()?;
        }
        Ok(())
    }

    fn current_collateral_balance(&mut self) -> Result<u64> {
        token_amount(&self.accounts.strike_pool)
    }

    fn current_underlying_balance(&mut self) -> Result<u64> {
        token_amount(&self.accounts.underlying_pool)
    }
}

impl<'info> OptionTokens for SplSettlement<'info> {
    fn holder_balance(&self) -> Result<u64> {
        let account = read_token_account(&self.accounts.signer_option_account)?;
        let signer = self.accounts.signer.key();

        if account.owner == signer {
            Ok(account.amount)
        } else if account.delegate == COption::Some(signer) {
            Ok(account.amount.min(account.delegated_amount))
        } else {
            Ok(0)
        }
    }

    fn issue(&mut self, amount: u64) -> Result<()> {
        let seeds = self.seeds.as_seeds();
        let signer_seeds: &[&[&[u8]]] = &[&seeds];

        token::mint_to(
            CpiContext::new_with_signer(
                self.accounts.token_program.clone(),
                token::MintTo {
                    mint: self.accounts.option_mint.clone(),
                    to: self.accounts.signer_option_account.clone(),
                    authority: self.accounts.vault.clone(),
                },
                signer_seeds,
            ),
            amount,
        )
    }

    fn retire(&mut self, amount: u64) -> Result<()> {
        token::burn(
            CpiContext::new(
                self.accounts.token_program.clone(),
                token::Burn {
                    mint: self.accounts.option_mint.clone(),
                    from: self.accounts.signer_option_account.clone(),
                    authority: self.accounts.signer.clone(),
                },
            ),
            amount,
        )
    }
}

/// An optional signer account that the current step needs after all.
fn require_account<T>(account: Option<&T>) -> Result<&T> {
    account.ok_or_else(|| error!(ErrorCode::InvalidTokenAccount))
}

/// Deserializes a token account from its current data (classic or 2022).
fn read_token_account(info: &AccountInfo<'_>) -> Result<TokenAccount> {
    let data = info.try_borrow_data()?;
    TokenAccount::try_deserialize(&mut &data[..])
}

fn token_amount(info: &AccountInfo<'_>) -> Result<u64> {
    Ok(read_token_account(info)?.amount)
}
