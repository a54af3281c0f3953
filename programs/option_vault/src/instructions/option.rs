use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::settlement::{SplAccounts, SplSettlement};
use crate::state::{CollateralVault, SettlementKind, WriterPosition};
use crate::utils::pda::SeriesSeeds;

/// Accounts for mint / burn / withdraw: everything a writer touches,
/// including the writer's locked-collateral position.
///
/// All vault-side accounts are validated against the addresses stored in
/// the CollateralVault at creation.
#[derive(Accounts)]
pub struct WriterContext<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        has_one = option_mint,
        has_one = strike_pool,
        has_one = underlying_pool,
        constraint = strike_mint.key() == vault.params.strike_mint,
        constraint = underlying_mint.key() == vault.params.underlying_mint
    )]
    pub vault: Account<'info, CollateralVault>,

    /// Locked-collateral ledger entry, keyed by the writer (not by token holdings)
    #[account(
        init_if_needed,
        payer = user,
        space = WriterPosition::SIZE,
        seeds = [WRITER_SEED, vault.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub writer_position: Account<'info, WriterPosition>,

    pub strike_mint: InterfaceAccount<'info, Mint>,

    pub underlying_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub option_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub strike_pool: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub underlying_pool: InterfaceAccount<'info, TokenAccount>,

    /// Source of collateral on mint, destination of refunds and strike payouts
    #[account(mut, token::mint = strike_mint)]
    pub user_strike_account: InterfaceAccount<'info, TokenAccount>,

    /// Destination of underlying payouts (wrapped SOL account for native series)
    #[account(mut, token::mint = underlying_mint)]
    pub user_underlying_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, token::mint = option_mint)]
    pub user_option_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> WriterContext<'info> {
    pub fn settlement(&self) -> SplSettlement<'info> {
        SplSettlement::new(
            self.vault.params.kind,
            SeriesSeeds::new(&self.vault.params, self.vault.bump),
            self.strike_mint.decimals,
            self.underlying_mint.decimals,
            SplAccounts {
                signer: self.user.to_account_info(),
                vault: self.vault.to_account_info(),
                strike_mint: self.strike_mint.to_account_info(),
                underlying_mint: self.underlying_mint.to_account_info(),
                option_mint: self.option_mint.to_account_info(),
                strike_pool: self.strike_pool.to_account_info(),
                underlying_pool: self.underlying_pool.to_account_info(),
                signer_strike_account: self.user_strike_account.to_account_info(),
                signer_underlying_account: Some(self.user_underlying_account.to_account_info()),
                signer_option_account: self.user_option_account.to_account_info(),
                token_program: self.token_program.to_account_info(),
                system_program: self.system_program.to_account_info(),
            },
        )
    }
}

/// Accounts for exercise. Holders need no ledger entry: exercising never
/// touches a writer position.
#[derive(Accounts)]
pub struct HolderContext<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        has_one = option_mint,
        has_one = strike_pool,
        has_one = underlying_pool,
        constraint = strike_mint.key() == vault.params.strike_mint,
        constraint = underlying_mint.key() == vault.params.underlying_mint
    )]
    pub vault: Account<'info, CollateralVault>,

    pub strike_mint: InterfaceAccount<'info, Mint>,

    pub underlying_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub option_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub strike_pool: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub underlying_pool: InterfaceAccount<'info, TokenAccount>,

    /// Receives the strike payout
    #[account(mut, token::mint = strike_mint)]
    pub user_strike_account: InterfaceAccount<'info, TokenAccount>,

    /// Underlying source. Native series take lamports from `user` instead,
    /// so the account may be omitted there.
    #[account(mut, token::mint = underlying_mint)]
    pub user_underlying_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = option_mint)]
    pub user_option_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> HolderContext<'info> {
    pub fn settlement(&self) -> SplSettlement<'info> {
        SplSettlement::new(
            self.vault.params.kind,
            SeriesSeeds::new(&self.vault.params, self.vault.bump),
            self.strike_mint.decimals,
            self.underlying_mint.decimals,
            SplAccounts {
                signer: self.user.to_account_info(),
                vault: self.vault.to_account_info(),
                strike_mint: self.strike_mint.to_account_info(),
                underlying_mint: self.underlying_mint.to_account_info(),
                option_mint: self.option_mint.to_account_info(),
                strike_pool: self.strike_pool.to_account_info(),
                underlying_pool: self.underlying_pool.to_account_info(),
                signer_strike_account: self.user_strike_account.to_account_info(),
                signer_underlying_account: self
                    .user_underlying_account
                    .as_ref()
                    .map(|account| account.to_account_info()),
                signer_option_account: self.user_option_account.to_account_info(),
                token_program: self.token_program.to_account_info(),
                system_program: self.system_program.to_account_info(),
            },
        )
    }
}

/// Read-only view of a series and its pools
#[derive(Accounts)]
pub struct SeriesView<'info> {
    #[account(has_one = strike_pool, has_one = underlying_pool)]
    pub vault: Account<'info, CollateralVault>,

    pub strike_pool: InterfaceAccount<'info, TokenAccount>,

    pub underlying_pool: InterfaceAccount<'info, TokenAccount>,
}

#[derive(Accounts)]
#[instruction(
    strike_price: u64,
    expiration_slot: u64,
    kind: SettlementKind,
)]
pub struct SeriesCreate<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    pub underlying_mint: InterfaceAccount<'info, Mint>,

    pub strike_mint: InterfaceAccount<'info, Mint>,

    /// The CollateralVault PDA - INITIALIZE it
    #[account(
        init,
        payer = creator,
        space = CollateralVault::SIZE,
        seeds = [
            SERIES_SEED,
            underlying_mint.key().as_ref(),
            strike_mint.key().as_ref(),
            strike_price.to_le_bytes().as_ref(),
            expiration_slot.to_le_bytes().as_ref(),
            &[kind.seed_byte()],
        ],
        bump
    )]
    pub vault: Account<'info, CollateralVault>,

    /// Option token mint: inherits the underlying's decimals, vault is authority
    #[account(
        init,
        payer = creator,
        seeds = [OPTION_MINT_SEED, vault.key().as_ref()],
        bump,
        mint::decimals = underlying_mint.decimals,
        mint::authority = vault,
        mint::token_program = token_program,
    )]
    pub option_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = creator,
        seeds = [STRIKE_POOL_SEED, vault.key().as_ref()],
        bump,
        token::mint = strike_mint,
        token::authority = vault,
        token::token_program = token_program,
    )]
    pub strike_pool: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        seeds = [UNDERLYING_POOL_SEED, vault.key().as_ref()],
        bump,
        token::mint = underlying_mint,
        token::authority = vault,
        token::token_program = token_program,
    )]
    pub underlying_pool: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
