//! Tests for the report folds, run against an in-memory source repository.

#[cfg(test)]
mod tests {
    use crate::books::books_traits::{BookSources, BooksRepositoryTrait, SourceWindow};
    use crate::books::{BooksService, BooksServiceTrait};
    use crate::cash::{CashTransaction, CashTransactionType};
    use crate::errors::DatabaseError;
    use crate::fees::{FeeType, TradingFee};
    use crate::funds::{FundTransactionType, MutualFundTransaction};
    use crate::invoices::{Invoice, InvoiceStatus, InvoiceType};
    use crate::stocks::{StockTransaction, StockTransactionType};
    use crate::{Error, Result};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    /// In-memory stand-in for the storage layer. Applies the same per-source
    /// date filtering the real repository does.
    #[derive(Default)]
    struct FakeBooksRepository {
        sources: BookSources,
    }

    impl BooksRepositoryTrait for FakeBooksRepository {
        fn fetch_sources(&self, _user_id: &str, window: &SourceWindow) -> Result<BookSources> {
            Ok(BookSources {
                cash_transactions: self
                    .sources
                    .cash_transactions
                    .iter()
                    .filter(|t| window.contains(t.date))
                    .cloned()
                    .collect(),
                invoices: self
                    .sources
                    .invoices
                    .iter()
                    .filter(|inv| window.contains(inv.invoice_date))
                    .cloned()
                    .collect(),
                stock_transactions: self
                    .sources
                    .stock_transactions
                    .iter()
                    .filter(|t| window.contains(t.transaction_date))
                    .cloned()
                    .collect(),
                fund_transactions: self
                    .sources
                    .fund_transactions
                    .iter()
                    .filter(|t| window.contains(t.transaction_date))
                    .cloned()
                    .collect(),
                trading_fees: self
                    .sources
                    .trading_fees
                    .iter()
                    .filter(|f| window.contains(f.fee_date))
                    .cloned()
                    .collect(),
            })
        }
    }

    struct FailingRepository;

    impl BooksRepositoryTrait for FailingRepository {
        fn fetch_sources(&self, _user_id: &str, _window: &SourceWindow) -> Result<BookSources> {
            Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )))
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cash(id: &str, transaction_type: CashTransactionType, amount: Decimal, date: NaiveDate) -> CashTransaction {
        CashTransaction {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            transaction_type,
            amount,
            category: "General".to_string(),
            description: None,
            date,
        }
    }

    fn invoice(
        id: &str,
        invoice_type: InvoiceType,
        status: InvoiceStatus,
        amount: Decimal,
        date: NaiveDate,
    ) -> Invoice {
        Invoice {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            invoice_number: format!("INV-{id}"),
            client_name: "Globex".to_string(),
            invoice_type,
            status,
            total_amount: amount,
            invoice_date: date,
            due_date: date,
        }
    }

    fn stock(
        id: &str,
        transaction_type: StockTransactionType,
        shares: Decimal,
        price: Decimal,
        date: NaiveDate,
    ) -> StockTransaction {
        StockTransaction {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            symbol: "ACME".to_string(),
            company_name: "Acme Corp".to_string(),
            transaction_type,
            shares,
            price_per_share: price,
            total_amount: shares * price,
            profit_loss: None,
            avg_cost_basis: None,
            transaction_date: date,
        }
    }

    fn fund(
        id: &str,
        transaction_type: FundTransactionType,
        amount: Decimal,
        date: NaiveDate,
    ) -> MutualFundTransaction {
        MutualFundTransaction {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            fund_name: "Fund A".to_string(),
            transaction_type,
            amount,
            units: None,
            nav: None,
            profit_loss: None,
            transaction_date: date,
            description: None,
        }
    }

    fn fee(id: &str, fee_type: FeeType, amount: Decimal, date: NaiveDate) -> TradingFee {
        TradingFee {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            fee_type,
            amount,
            fee_date: date,
            description: None,
        }
    }

    fn service(sources: BookSources) -> BooksService {
        BooksService::new(Arc::new(FakeBooksRepository { sources }))
    }

    #[test]
    fn test_income_and_expense_flow_through_journal_ledger_and_income_statement() {
        // One income of 1000 on Jan 10, one expense of 400 on Jan 15.
        let service = service(BookSources {
            cash_transactions: vec![
                cash("1", CashTransactionType::Income, dec!(1000), ymd(2024, 1, 10)),
                cash("2", CashTransactionType::Expense, dec!(400), ymd(2024, 1, 15)),
            ],
            ..Default::default()
        });
        let start = ymd(2024, 1, 1);
        let end = ymd(2024, 1, 31);

        let journal = service.get_journal("user-1", start, end).unwrap();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].debit_account, "Cash");
        assert_eq!(journal[1].credit_account, "Cash");

        let ledger = service.get_ledger("user-1", start, end).unwrap();
        let cash_row = ledger.iter().find(|r| r.account == "Cash").unwrap();
        assert_eq!(cash_row.debits, dec!(1000));
        assert_eq!(cash_row.credits, dec!(400));
        assert_eq!(cash_row.balance, dec!(600));

        let statement = service.get_income_statement("user-1", start, end).unwrap();
        assert_eq!(statement.revenue.total_revenue, dec!(1000));
        assert_eq!(statement.expenses.total_expenses, dec!(400));
        assert_eq!(statement.net_income, dec!(600));
    }

    #[test]
    fn test_cancelled_invoice_is_excluded_from_trial_balance_only() {
        // A cancelled expense invoice inside the window.
        let service = service(BookSources {
            invoices: vec![invoice(
                "1",
                InvoiceType::Expense,
                InvoiceStatus::Cancelled,
                dec!(200),
                ymd(2024, 2, 10),
            )],
            ..Default::default()
        });
        let start = ymd(2024, 2, 1);
        let end = ymd(2024, 2, 28);

        let journal = service.get_journal("user-1", start, end).unwrap();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].credit_account, "Accounts Payable");

        let ledger = service.get_ledger("user-1", start, end).unwrap();
        assert!(ledger.iter().any(|r| r.account == "Accounts Payable"));

        let trial_balance = service.get_trial_balance("user-1", end).unwrap();
        assert!(trial_balance.is_empty());
    }

    #[test]
    fn test_trial_balance_nets_and_sorts_rows() {
        let service = service(BookSources {
            cash_transactions: vec![
                cash("1", CashTransactionType::Income, dec!(1000), ymd(2024, 1, 5)),
                cash("2", CashTransactionType::Expense, dec!(300), ymd(2024, 1, 6)),
            ],
            trading_fees: vec![fee("1", FeeType::Cgt, dec!(50), ymd(2024, 1, 7))],
            ..Default::default()
        });
        let rows = service.get_trial_balance("user-1", ymd(2024, 1, 31)).unwrap();

        // Alphabetical account order.
        let names: Vec<&str> = rows.iter().map(|r| r.account.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        // Cash is netted to one debit side: 1000 - 300 - 50.
        let cash_row = rows.iter().find(|r| r.account == "Cash").unwrap();
        assert_eq!(cash_row.debit, dec!(650));
        assert_eq!(cash_row.credit, dec!(0));

        // No row carries both sides.
        for row in &rows {
            assert!(
                row.debit == Decimal::ZERO || row.credit == Decimal::ZERO,
                "row {} has both sides",
                row.account
            );
        }
    }

    #[test]
    fn test_journal_tie_break_is_source_order_on_equal_dates() {
        let date = ymd(2024, 3, 1);
        let service = service(BookSources {
            cash_transactions: vec![cash("1", CashTransactionType::Income, dec!(10), date)],
            invoices: vec![invoice("1", InvoiceType::Income, InvoiceStatus::Paid, dec!(20), date)],
            stock_transactions: vec![stock("1", StockTransactionType::Buy, dec!(1), dec!(30), date)],
            fund_transactions: vec![fund("1", FundTransactionType::Invest, dec!(40), date)],
            trading_fees: vec![fee("1", FeeType::Other, dec!(5), date)],
        });
        let journal = service.get_journal("user-1", date, date).unwrap();
        let ids: Vec<&str> = journal.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["txn-1", "inv-1", "stock-1", "mf-1", "fee-1"]);
    }

    #[test]
    fn test_ledger_balance_matches_signed_journal_amounts() {
        let service = service(BookSources {
            cash_transactions: vec![
                cash("1", CashTransactionType::Income, dec!(500), ymd(2024, 1, 2)),
                cash("2", CashTransactionType::Expense, dec!(120), ymd(2024, 1, 3)),
            ],
            stock_transactions: vec![stock(
                "1",
                StockTransactionType::Buy,
                dec!(2),
                dec!(100),
                ymd(2024, 1, 4),
            )],
            ..Default::default()
        });
        let start = ymd(2024, 1, 1);
        let end = ymd(2024, 1, 31);

        let journal = service.get_journal("user-1", start, end).unwrap();
        let ledger = service.get_ledger("user-1", start, end).unwrap();

        for row in &ledger {
            let signed: Decimal = journal
                .iter()
                .map(|e| {
                    let mut amount = Decimal::ZERO;
                    if e.debit_account == row.account {
                        amount += e.amount;
                    }
                    if e.credit_account == row.account {
                        amount -= e.amount;
                    }
                    amount
                })
                .sum();
            assert_eq!(row.balance, signed, "account {}", row.account);
        }
    }

    #[test]
    fn test_balance_sheet_composition() {
        let service = service(BookSources {
            cash_transactions: vec![
                cash("1", CashTransactionType::Income, dec!(5000), ymd(2024, 1, 2)),
                cash("2", CashTransactionType::Expense, dec!(1000), ymd(2024, 1, 3)),
            ],
            invoices: vec![
                invoice("1", InvoiceType::Income, InvoiceStatus::Sent, dec!(700), ymd(2024, 1, 4)),
                invoice("2", InvoiceType::Expense, InvoiceStatus::Overdue, dec!(300), ymd(2024, 1, 5)),
                // Paid and draft invoices stay off the receivable/payable lines.
                invoice("3", InvoiceType::Income, InvoiceStatus::Paid, dec!(999), ymd(2024, 1, 6)),
            ],
            stock_transactions: vec![
                stock("1", StockTransactionType::Buy, dec!(10), dec!(100), ymd(2024, 1, 7)),
                stock("2", StockTransactionType::Sell, dec!(4), dec!(100), ymd(2024, 1, 8)),
            ],
            fund_transactions: vec![fund("1", FundTransactionType::Invest, dec!(400), ymd(2024, 1, 9))],
            ..Default::default()
        });
        let sheet = service.get_balance_sheet("user-1", ymd(2024, 1, 31)).unwrap();

        assert_eq!(sheet.assets.current_assets.cash, dec!(4000));
        assert_eq!(sheet.assets.current_assets.accounts_receivable, dec!(700));
        assert_eq!(sheet.assets.current_assets.inventory, dec!(0));
        assert_eq!(sheet.assets.current_assets.total, dec!(4700));
        // 1000 bought - 400 sold + 400 invested
        assert_eq!(sheet.assets.non_current_assets.investments, dec!(1000));
        assert_eq!(sheet.assets.total_assets, dec!(5700));
        assert_eq!(
            sheet.liabilities.current_liabilities.accounts_payable,
            dec!(300)
        );
        // Retained earnings is the assets-minus-liabilities plug.
        assert_eq!(sheet.equity.retained_earnings, dec!(5400));
        assert_eq!(sheet.equity.total_equity, dec!(5400));
    }

    #[test]
    fn test_cash_flow_beginning_cash_counts_only_prior_transactions() {
        let service = service(BookSources {
            cash_transactions: vec![
                // Before the period
                cash("1", CashTransactionType::Income, dec!(2000), ymd(2023, 12, 1)),
                cash("2", CashTransactionType::Expense, dec!(500), ymd(2023, 12, 15)),
                // Inside the period
                cash("3", CashTransactionType::Income, dec!(800), ymd(2024, 1, 10)),
            ],
            invoices: vec![invoice(
                "1",
                InvoiceType::Expense,
                InvoiceStatus::Paid,
                dec!(100),
                ymd(2024, 1, 12),
            )],
            stock_transactions: vec![
                stock("1", StockTransactionType::Buy, dec!(3), dec!(100), ymd(2024, 1, 15)),
                stock("2", StockTransactionType::Sell, dec!(1), dec!(150), ymd(2024, 1, 20)),
            ],
            ..Default::default()
        });
        let flow = service
            .get_cash_flow("user-1", ymd(2024, 1, 1), ymd(2024, 1, 31))
            .unwrap();

        assert_eq!(flow.beginning_cash, dec!(1500));
        assert_eq!(flow.operating_activities.cash_from_operations, dec!(700));
        assert_eq!(flow.investing_activities.investments_purchased, dec!(-300));
        assert_eq!(flow.investing_activities.investments_sold, dec!(150));
        assert_eq!(flow.investing_activities.total, dec!(-150));
        assert_eq!(flow.financing_activities.total, dec!(0));
        assert_eq!(flow.net_cash_flow, dec!(550));
        assert_eq!(flow.ending_cash, dec!(2050));
    }

    #[test]
    fn test_dividends_feed_revenue_but_not_investing() {
        let service = service(BookSources {
            stock_transactions: vec![stock(
                "1",
                StockTransactionType::Dividend,
                dec!(75),
                dec!(1),
                ymd(2024, 1, 10),
            )],
            ..Default::default()
        });
        let start = ymd(2024, 1, 1);
        let end = ymd(2024, 1, 31);

        let statement = service.get_income_statement("user-1", start, end).unwrap();
        assert_eq!(statement.revenue.dividends, dec!(75));
        assert_eq!(statement.revenue.total_revenue, dec!(75));

        // No journal entry and no investing activity for a dividend row.
        assert!(service.get_journal("user-1", start, end).unwrap().is_empty());
        let flow = service.get_cash_flow("user-1", start, end).unwrap();
        assert_eq!(flow.investing_activities.total, dec!(0));
    }

    #[test]
    fn test_reports_are_idempotent() {
        let service = service(BookSources {
            cash_transactions: vec![cash("1", CashTransactionType::Income, dec!(1000), ymd(2024, 1, 10))],
            invoices: vec![invoice("1", InvoiceType::Income, InvoiceStatus::Sent, dec!(300), ymd(2024, 1, 11))],
            trading_fees: vec![fee("1", FeeType::BrokerCharge, dec!(9), ymd(2024, 1, 12))],
            ..Default::default()
        });
        let start = ymd(2024, 1, 1);
        let end = ymd(2024, 1, 31);

        assert_eq!(
            service.get_journal("user-1", start, end).unwrap(),
            service.get_journal("user-1", start, end).unwrap()
        );
        assert_eq!(
            service.get_trial_balance("user-1", end).unwrap(),
            service.get_trial_balance("user-1", end).unwrap()
        );
        assert_eq!(
            service.get_balance_sheet("user-1", end).unwrap(),
            service.get_balance_sheet("user-1", end).unwrap()
        );
        assert_eq!(
            service.get_cash_flow("user-1", start, end).unwrap(),
            service.get_cash_flow("user-1", start, end).unwrap()
        );
    }

    #[test]
    fn test_source_failure_aborts_the_report() {
        let service = BooksService::new(Arc::new(FailingRepository));
        let result = service.get_journal("user-1", ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::QueryFailed(_)))
        ));
    }
}
