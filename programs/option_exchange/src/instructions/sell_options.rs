use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use option_vault::cpi::accounts::WriterContext;
use option_vault::program::OptionVault;
use option_vault::CollateralVault;

use crate::errors::ErrorCode;
use crate::events::OptionsSold;
use crate::instructions::fill_order::release_from_escrow;
use crate::state::market::Market;
use crate::state::order::Order;

/// Mint-and-sell in one transaction: the seller writes `amount` options
/// against the vault and fills a resting buy order with them.
///
/// Market and order are taken unchecked and loaded in the handler, so a
/// missing venue reports `ExchangeNotFound` rather than an account error.
#[derive(Accounts)]
pub struct SellOptions<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(
        mut,
        constraint = vault.option_mint == option_mint.key() @ ErrorCode::InvalidMint
    )]
    pub vault: Account<'info, CollateralVault>,

    /// CHECK: created on demand and validated by the option vault program
    #[account(mut)]
    pub writer_position: UncheckedAccount<'info>,

    /// CHECK: address is pinned by the seeds; existence and ownership are
    /// checked by `load_market`
    #[account(
        mut,
        seeds = [b"market", option_mint.key().as_ref(), output_mint.key().as_ref()],
        bump
    )]
    pub market: UncheckedAccount<'info>,

    /// CHECK: deserialized and bound to `market` by `load_order`
    #[account(mut)]
    pub maker_order: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [b"escrow", maker_order.key().as_ref()],
        bump
    )]
    pub maker_escrow: InterfaceAccount<'info, TokenAccount>,

    /// Maker's option token account
    #[account(mut, token::mint = option_mint)]
    pub maker_receive_account: InterfaceAccount<'info, TokenAccount>,

    pub strike_mint: InterfaceAccount<'info, Mint>,

    pub underlying_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub option_mint: InterfaceAccount<'info, Mint>,

    pub output_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub strike_pool: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub underlying_pool: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub seller_strike_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub seller_underlying_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub seller_option_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, token::mint = output_mint)]
    pub seller_output_account: InterfaceAccount<'info, TokenAccount>,

    pub option_vault_program: Program<'info, OptionVault>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Everything a sale needs to agree on before any asset moves
pub struct SaleRequest<'a> {
    pub now: i64,
    pub deadline: i64,
    pub market: Option<&'a Market>,
    pub market_key: Pubkey,
    pub vault: Pubkey,
    pub order: &'a Order,
    pub amount: u64,
    pub min_output: u64,
}

/// Precondition chain for `sell_options`: deadline, then venue, then order.
/// Returns the quote proceeds of the fill.
pub fn validate_sale(request: &SaleRequest) -> Result<u64> {
    require!(request.now <= request.deadline, ErrorCode::DeadlineExceeded);

    let market = request.market.ok_or(ErrorCode::ExchangeNotFound)?;
    require_keys_eq!(market.vault, request.vault, ErrorCode::InvalidMarket);

    let order = request.order;
    require_keys_eq!(order.market, request.market_key, ErrorCode::InvalidMarket);
    require!(order.is_buy, ErrorCode::InvalidOrderSide);
    require!(request.amount > 0, ErrorCode::InvalidAmount);
    require!(request.amount <= order.remaining(), ErrorCode::InvalidFillSize);

    let proceeds = market.quote_amount(order.price, request.amount)?;
    require!(proceeds >= request.min_output, ErrorCode::SlippageExceeded);

    Ok(proceeds)
}

/// Loads an account of this program, `None` when nothing lives there
fn load_owned<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..]).map(Some)
}

fn store<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut dst: &mut [u8] = &mut data;
    value.try_serialize(&mut dst)
}

impl<'info> SellOptions<'info> {
    fn load_market(&self) -> Result<Option<Market>> {
        load_owned(&self.market.to_account_info())
    }

    fn load_order(&self) -> Result<Order> {
        load_owned(&self.maker_order.to_account_info())?
            .ok_or_else(|| error!(ErrorCode::InvalidMarket))
    }

    fn mint_context(&self) -> CpiContext<'_, '_, '_, 'info, WriterContext<'info>> {
        CpiContext::new(
            self.option_vault_program.to_account_info(),
            WriterContext {
                user: self.seller.to_account_info(),
                vault: self.vault.to_account_info(),
                writer_position: self.writer_position.to_account_info(),
                strike_mint: self.strike_mint.to_account_info(),
                underlying_mint: self.underlying_mint.to_account_info(),
                option_mint: self.option_mint.to_account_info(),
                strike_pool: self.strike_pool.to_account_info(),
                underlying_pool: self.underlying_pool.to_account_info(),
                user_strike_account: self.seller_strike_account.to_account_info(),
                user_underlying_account: self.seller_underlying_account.to_account_info(),
                user_option_account: self.seller_option_account.to_account_info(),
                token_program: self.token_program.to_account_info(),
                system_program: self.system_program.to_account_info(),
            },
        )
    }
}

pub fn handler(
    ctx: Context<SellOptions>,
    amount: u64,
    min_output: u64,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    require!(now <= deadline, ErrorCode::DeadlineExceeded);

    let mut market = ctx
        .accounts
        .load_market()?
        .ok_or(ErrorCode::ExchangeNotFound)?;
    let mut order = ctx.accounts.load_order()?;

    let proceeds = validate_sale(&SaleRequest {
        now,
        deadline,
        market: Some(&market),
        market_key: ctx.accounts.market.key(),
        vault: ctx.accounts.vault.key(),
        order: &order,
        amount,
        min_output,
    })?;
    require_keys_eq!(
        ctx.accounts.maker_receive_account.owner,
        order.owner,
        ErrorCode::UnauthorizedAccess
    );

    // Seller becomes the writer of record for the new options
    option_vault::cpi::mint_options(ctx.accounts.mint_context(), amount)?;

    token_interface::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.seller_option_account.to_account_info(),
                mint: ctx.accounts.option_mint.to_account_info(),
                to: ctx.accounts.maker_receive_account.to_account_info(),
                authority: ctx.accounts.seller.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.option_mint.decimals,
    )?;

    release_from_escrow(
        &order,
        ctx.accounts.maker_order.to_account_info(),
        ctx.accounts.maker_escrow.to_account_info(),
        ctx.accounts.output_mint.to_account_info(),
        ctx.accounts.seller_output_account.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        proceeds,
        ctx.accounts.output_mint.decimals,
    )?;

    let completed = order.apply_fill(amount)?;
    market.record_fill(amount, proceeds, completed)?;
    store(&ctx.accounts.maker_order.to_account_info(), &order)?;
    store(&ctx.accounts.market.to_account_info(), &market)?;

    msg!(
        "Sold {} options of vault {} for {} {}",
        amount,
        ctx.accounts.vault.key(),
        proceeds,
        ctx.accounts.output_mint.key()
    );

    emit!(OptionsSold {
        seller: ctx.accounts.seller.key(),
        vault: ctx.accounts.vault.key(),
        amount,
        output_mint: ctx.accounts.output_mint.key(),
        proceeds,
    });

    Ok(())
}
