//! End-to-end mutation flows through the SQLite repositories.

mod common;

use rust_decimal_macros::dec;

use finbooks_core::cash::{CashAdjustment, CashRepositoryTrait, CashTransactionType};
use finbooks_core::errors::{Error, PositionError};
use finbooks_core::funds::{
    FundRepositoryTrait, InvestOrder, RevalueRequest, WithdrawOrder, FUND_INVESTMENT_CATEGORY,
};
use finbooks_core::stocks::{
    BuyOrder, DividendRecord, SellOrder, StockRepositoryTrait, StockTransactionType,
};
use finbooks_storage_sqlite::cash::CashRepository;
use finbooks_storage_sqlite::funds::FundRepository;
use finbooks_storage_sqlite::stocks::StockRepository;

use common::{date, setup};

const USER: &str = "test-user";

fn deposit(amount: rust_decimal::Decimal, day: u32) -> CashAdjustment {
    CashAdjustment {
        user_id: USER.to_string(),
        amount,
        date: Some(date(2024, 1, day)),
    }
}

#[tokio::test]
async fn test_deposit_updates_balance_and_writes_mirror_row() {
    let db = setup();
    let cash = CashRepository::new(db.pool.clone(), db.writer.clone());

    let account = cash.execute_deposit(deposit(dec!(500), 1)).await.unwrap();
    assert_eq!(account.balance, dec!(500));

    let rows = cash.list_transactions(USER).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].transaction_type, CashTransactionType::Income);
    assert_eq!(rows[0].category, "Cash Deposit");
    assert_eq!(rows[0].amount, dec!(500));
}

#[tokio::test]
async fn test_overdrawn_withdrawal_writes_nothing() {
    let db = setup();
    let cash = CashRepository::new(db.pool.clone(), db.writer.clone());

    cash.execute_deposit(deposit(dec!(100), 1)).await.unwrap();
    let err = cash
        .execute_withdrawal(deposit(dec!(250), 2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Position(PositionError::InsufficientFunds { .. })
    ));

    // Balance and transaction log are untouched by the failed attempt.
    let account = cash.get_or_create_account(USER).await.unwrap();
    assert_eq!(account.balance, dec!(100));
    assert_eq!(cash.list_transactions(USER).unwrap().len(), 1);
}

#[tokio::test]
async fn test_buy_sell_cycle_settles_cash_and_averages_cost() {
    let db = setup();
    let cash = CashRepository::new(db.pool.clone(), db.writer.clone());
    let stocks = StockRepository::new(db.pool.clone(), db.writer.clone());

    cash.execute_deposit(deposit(dec!(5000), 1)).await.unwrap();

    let first = stocks
        .execute_buy(BuyOrder {
            user_id: USER.to_string(),
            symbol: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            shares: dec!(10),
            price_per_share: dec!(100),
            date: Some(date(2024, 1, 2)),
        })
        .await
        .unwrap();
    assert_eq!(first.position.avg_buy_price, dec!(100));

    let second = stocks
        .execute_buy(BuyOrder {
            user_id: USER.to_string(),
            symbol: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            shares: dec!(10),
            price_per_share: dec!(200),
            date: Some(date(2024, 1, 3)),
        })
        .await
        .unwrap();
    assert_eq!(second.position.total_shares, dec!(20));
    assert_eq!(second.position.avg_buy_price, dec!(150));
    assert_eq!(second.position.total_invested, dec!(3000));

    let sale = stocks
        .execute_sell(SellOrder {
            user_id: USER.to_string(),
            symbol: "AAPL".to_string(),
            shares: dec!(5),
            price_per_share: dec!(300),
            date: Some(date(2024, 1, 4)),
        })
        .await
        .unwrap();
    assert_eq!(sale.profit_loss, dec!(750));
    let position = sale.position.expect("position stays open");
    assert_eq!(position.total_shares, dec!(15));
    assert_eq!(position.avg_buy_price, dec!(150));
    assert_eq!(position.total_invested, dec!(2250));

    // 5000 - 1000 - 2000 + 1500
    let account = cash.get_or_create_account(USER).await.unwrap();
    assert_eq!(account.balance, dec!(3500));

    let events = stocks.list_transactions(USER).unwrap();
    assert_eq!(events.len(), 3);
    let sell_event = events
        .iter()
        .find(|t| t.transaction_type == StockTransactionType::Sell)
        .unwrap();
    assert_eq!(sell_event.profit_loss, Some(dec!(750)));
    assert_eq!(sell_event.avg_cost_basis, Some(dec!(150)));
}

#[tokio::test]
async fn test_selling_out_deletes_the_position() {
    let db = setup();
    let cash = CashRepository::new(db.pool.clone(), db.writer.clone());
    let stocks = StockRepository::new(db.pool.clone(), db.writer.clone());

    cash.execute_deposit(deposit(dec!(1000), 1)).await.unwrap();
    stocks
        .execute_buy(BuyOrder {
            user_id: USER.to_string(),
            symbol: "TSLA".to_string(),
            company_name: "Tesla".to_string(),
            shares: dec!(4),
            price_per_share: dec!(250),
            date: Some(date(2024, 1, 2)),
        })
        .await
        .unwrap();

    let sale = stocks
        .execute_sell(SellOrder {
            user_id: USER.to_string(),
            symbol: "TSLA".to_string(),
            shares: dec!(4),
            price_per_share: dec!(260),
            date: Some(date(2024, 1, 3)),
        })
        .await
        .unwrap();
    assert!(sale.position.is_none());
    assert!(stocks.get_positions(USER).unwrap().is_empty());
}

#[tokio::test]
async fn test_buy_without_funds_rejects_before_writing() {
    let db = setup();
    let stocks = StockRepository::new(db.pool.clone(), db.writer.clone());

    let err = stocks
        .execute_buy(BuyOrder {
            user_id: USER.to_string(),
            symbol: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            shares: dec!(1),
            price_per_share: dec!(100),
            date: Some(date(2024, 1, 2)),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Position(PositionError::InsufficientFunds { .. })
    ));
    assert!(stocks.get_positions(USER).unwrap().is_empty());
    assert!(stocks.list_transactions(USER).unwrap().is_empty());
}

#[tokio::test]
async fn test_dividend_row_reads_back_at_gross_amount() {
    let db = setup();
    let stocks = StockRepository::new(db.pool.clone(), db.writer.clone());

    let transaction = stocks
        .record_dividend(DividendRecord {
            user_id: USER.to_string(),
            symbol: "MSFT".to_string(),
            amount: dec!(42.50),
            date: Some(date(2024, 2, 1)),
        })
        .await
        .unwrap();
    assert_eq!(transaction.transaction_type, StockTransactionType::Dividend);
    assert_eq!(transaction.shares * transaction.price_per_share, dec!(42.50));
    assert_eq!(transaction.total_amount, dec!(42.50));
    assert!(stocks.get_positions(USER).unwrap().is_empty());
}

#[tokio::test]
async fn test_fund_invest_revalue_withdraw_cycle() {
    let db = setup();
    let cash = CashRepository::new(db.pool.clone(), db.writer.clone());
    let funds = FundRepository::new(db.pool.clone(), db.writer.clone());

    let invested = funds
        .execute_invest(InvestOrder {
            user_id: USER.to_string(),
            fund_name: "Index Growth".to_string(),
            amount: dec!(1000),
            fund_type: Some("equity".to_string()),
            units: None,
            nav: None,
            date: Some(date(2024, 3, 1)),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(invested.position.current_value, dec!(1000));
    assert_eq!(invested.position.profit_loss, dec!(0));

    // The mirror row carries the cash leg; the balance itself is untouched.
    let mirror = cash.list_transactions(USER).unwrap();
    assert_eq!(mirror.len(), 1);
    assert_eq!(mirror[0].category, FUND_INVESTMENT_CATEGORY);
    assert_eq!(mirror[0].transaction_type, CashTransactionType::Expense);
    let account = cash.get_or_create_account(USER).await.unwrap();
    assert_eq!(account.balance, dec!(0));

    let revalued = funds
        .execute_revalue(RevalueRequest {
            user_id: USER.to_string(),
            fund_id: invested.position.id.clone(),
            new_value: dec!(1200),
            nav: None,
            date: Some(date(2024, 3, 15)),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(revalued.value_change, dec!(200));
    assert_eq!(revalued.value_change_percentage, dec!(20));
    assert_eq!(revalued.position.total_invested, dec!(1000));
    assert_eq!(revalued.position.profit_loss, dec!(200));

    let history = funds.list_value_history(USER, None).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_value, dec!(1000));
    assert_eq!(history[0].new_value, dec!(1200));

    let withdrawn = funds
        .execute_withdraw(WithdrawOrder {
            user_id: USER.to_string(),
            fund_id: invested.position.id.clone(),
            amount: dec!(600),
            units: None,
            nav: None,
            date: Some(date(2024, 3, 20)),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(withdrawn.profit_loss, dec!(100));
    let position = withdrawn.position.expect("position stays open");
    assert_eq!(position.current_value, dec!(600));
    assert_eq!(position.total_invested, dec!(500));
}

#[tokio::test]
async fn test_full_fund_withdrawal_deletes_the_position() {
    let db = setup();
    let funds = FundRepository::new(db.pool.clone(), db.writer.clone());

    let invested = funds
        .execute_invest(InvestOrder {
            user_id: USER.to_string(),
            fund_name: "Bond Fund".to_string(),
            amount: dec!(750),
            fund_type: None,
            units: None,
            nav: None,
            date: Some(date(2024, 4, 1)),
            description: None,
        })
        .await
        .unwrap();

    let withdrawn = funds
        .execute_withdraw(WithdrawOrder {
            user_id: USER.to_string(),
            fund_id: invested.position.id.clone(),
            amount: dec!(750),
            units: None,
            nav: None,
            date: Some(date(2024, 4, 2)),
            description: None,
        })
        .await
        .unwrap();
    assert!(withdrawn.position.is_none());
    assert!(funds.get_positions(USER).unwrap().is_empty());
}

#[tokio::test]
async fn test_overdrawn_fund_withdrawal_rejects() {
    let db = setup();
    let funds = FundRepository::new(db.pool.clone(), db.writer.clone());

    let invested = funds
        .execute_invest(InvestOrder {
            user_id: USER.to_string(),
            fund_name: "Bond Fund".to_string(),
            amount: dec!(100),
            fund_type: None,
            units: None,
            nav: None,
            date: Some(date(2024, 4, 1)),
            description: None,
        })
        .await
        .unwrap();

    let err = funds
        .execute_withdraw(WithdrawOrder {
            user_id: USER.to_string(),
            fund_id: invested.position.id.clone(),
            amount: dec!(100.01),
            units: None,
            nav: None,
            date: Some(date(2024, 4, 2)),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Position(PositionError::InsufficientValue { .. })
    ));
    assert_eq!(funds.list_transactions(USER).unwrap().len(), 1);
}
