use super::harness::*;
use crate::errors::ErrorCode;
use crate::state::SettlementKind;

const SELLER: u8 = 1;

#[test]
fn test_mint_locks_strike_value_and_issues_options() {
    let mut chain = SimulatedChain::wbtc_usdc(SettlementKind::Standard);
    let seller = key(SELLER);
    chain.prepare_writer(seller, 100_000_000);

    let collateral = chain.mint(seller, 100_000_000).unwrap();

    assert_eq!(collateral, 7_000_000_000);
    assert_eq!(chain.strike_of(&seller), 0);
    assert_eq!(chain.options_of(&seller), 100_000_000);
    assert_eq!(chain.locked_of(&seller), 7_000_000_000);
    assert_eq!(chain.strike_pool(), 7_000_000_000);
    assert_eq!(chain.vault.option_supply, 100_000_000);
    assert_eq!(chain.vault.total_locked, 7_000_000_000);
}

#[test]
fn test_mint_smallest_unit() {
    let mut chain = SimulatedChain::wbtc_usdc(SettlementKind::Standard);
    let seller = key(SELLER);
    chain.prepare_writer(seller, 1);

    assert_eq!(chain.mint(seller, 1).unwrap(), 70);
    assert_eq!(chain.vault.option_supply, 1);
    assert_eq!(chain.locked_of(&seller), 70);
}

#[test]
fn test_mint_rejects_zero_value_amount() {
    // 18-decimal underlying struck at 300 (6 decimals): 1 wei is worth 0
    let mut chain = SimulatedChain::new(SettlementKind::Standard, 18, 6, 300_000_000);
    let seller = key(SELLER);
    chain.fund_strike(seller, 1_000_000_000);
    chain.approve_strike(seller, u64::MAX);

    assert_eq!(error_code(chain.mint(seller, 1)), code(ErrorCode::AmountTooLow));
    assert_eq!(error_code(chain.mint(seller, 0)), code(ErrorCode::AmountTooLow));
    assert_eq!(chain.vault.option_supply, 0);
    assert_eq!(chain.strike_of(&seller), 1_000_000_000);
}

#[test]
fn test_mint_without_collateral_balance_changes_nothing() {
    let mut chain = SimulatedChain::wbtc_usdc(SettlementKind::Standard);
    let seller = key(SELLER);
    chain.fund_strike(seller, 6_999_999_999);
    chain.approve_strike(seller, u64::MAX);

    assert_eq!(
        error_code(chain.mint(seller, 100_000_000)),
        code(ErrorCode::InsufficientBalance)
    );
    assert_eq!(chain.strike_of(&seller), 6_999_999_999);
    assert_eq!(chain.options_of(&seller), 0);
    assert_eq!(chain.locked_of(&seller), 0);
    assert_eq!(chain.strike_pool(), 0);
    assert_eq!(chain.vault.option_supply, 0);
    assert_eq!(chain.vault.total_locked, 0);
}

#[test]
fn test_mint_without_allowance_changes_nothing() {
    let mut chain = SimulatedChain::wbtc_usdc(SettlementKind::Standard);
    let seller = key(SELLER);
    chain.fund_strike(seller, 7_000_000_000);
    chain.approve_strike(seller, 6_999_999_999);

    assert_eq!(
        error_code(chain.mint(seller, 100_000_000)),
        code(ErrorCode::InsufficientAllowance)
    );
    assert_eq!(chain.strike_of(&seller), 7_000_000_000);
    assert_eq!(chain.options_of(&seller), 0);
    assert_eq!(chain.vault.option_supply, 0);
    assert_eq!(chain.vault.total_locked, 0);
}

#[test]
fn test_mint_after_expiration_fails() {
    let mut chain = SimulatedChain::wbtc_usdc(SettlementKind::Standard);
    let seller = key(SELLER);
    chain.prepare_writer(seller, 100_000_000);

    chain.advance_to(EXPIRATION_SLOT - 1);
    assert!(chain.mint(seller, 50_000_000).is_ok());

    chain.expire();
    assert_eq!(
        error_code(chain.mint(seller, 50_000_000)),
        code(ErrorCode::OptionExpired)
    );
    assert_eq!(chain.vault.option_supply, 50_000_000);
}

#[test]
fn test_incremental_mints_round_down_each_time() {
    // 70.5 strike units per option unit
    let mut chain = SimulatedChain::new(SettlementKind::Standard, 8, 6, 7_050_000_000);
    let small = key(1);
    let large = key(2);
    chain.fund_strike(small, 1_000);
    chain.approve_strike(small, u64::MAX);
    chain.fund_strike(large, 1_000);
    chain.approve_strike(large, u64::MAX);

    chain.mint(small, 1).unwrap();
    chain.mint(small, 1).unwrap();
    chain.mint(large, 2).unwrap();

    assert_eq!(chain.locked_of(&small), 140);
    assert_eq!(chain.locked_of(&large), 141);
    assert_eq!(chain.vault.total_locked, 281);
    assert_eq!(chain.strike_pool(), 281);
}

#[test]
fn test_yield_bearing_mint_tracks_locked_value() {
    let mut chain = SimulatedChain::wbtc_usdc(SettlementKind::YieldBearing);
    let seller = key(SELLER);
    chain.prepare_writer(seller, 100_000_000);
    chain.mint(seller, 100_000_000).unwrap();

    chain.accrue_yield(1_000);

    // accrual grows the pool, not the ledger
    assert_eq!(chain.strike_pool(), 7_700_000_000);
    assert_eq!(chain.vault.total_locked, 7_000_000_000);
    assert_eq!(chain.locked_of(&seller), 7_000_000_000);
}
