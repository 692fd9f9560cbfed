//! The six report folds.
//!
//! Each report fetches one snapshot of the five raw sources and derives its
//! output in memory. Window semantics differ per report: journal, ledger,
//! income statement, and cash flow are period reports; trial balance and
//! balance sheet are cumulative as of an end date.

use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::books_model::{
    Assets, BalanceSheet, CashFlowStatement, CurrentAssets, CurrentLiabilities, Equity,
    ExpenseBreakdown, FinancingActivities, IncomeStatement, InvestingActivities, JournalEntry,
    LedgerAccountRow, Liabilities, NonCurrentAssets, OperatingActivities, RevenueBreakdown,
    TrialBalanceRow,
};
use super::books_traits::{BookSources, BooksRepositoryTrait, BooksServiceTrait, SourceWindow};
use super::posting::{
    fund_gross_amount, post_cash_transaction, post_fund_transaction, post_invoice,
    post_stock_transaction, post_trading_fee, stock_gross_amount, Posting,
};
use crate::cash::CashTransactionType;
use crate::errors::Result;
use crate::fees::FeeType;
use crate::funds::FundTransactionType;
use crate::invoices::{Invoice, InvoiceStatus, InvoiceType};
use crate::stocks::StockTransactionType;

/// Service deriving the journal, ledger, trial balance, and financial
/// statements from raw event sources.
pub struct BooksService {
    repository: Arc<dyn BooksRepositoryTrait>,
}

impl BooksService {
    pub fn new(repository: Arc<dyn BooksRepositoryTrait>) -> Self {
        Self { repository }
    }
}

/// Maps every event in the snapshot through the posting table and sorts the
/// result by `(date, source, id)`. The source rank keeps same-date entries in
/// the fixed source order; the id makes the order total.
fn postings_sorted(sources: &BookSources, invoice_filter: fn(&Invoice) -> bool) -> Vec<Posting> {
    let mut postings: Vec<Posting> = Vec::new();
    postings.extend(sources.cash_transactions.iter().filter_map(post_cash_transaction));
    postings.extend(
        sources
            .invoices
            .iter()
            .filter(|inv| invoice_filter(inv))
            .filter_map(post_invoice),
    );
    postings.extend(sources.stock_transactions.iter().filter_map(post_stock_transaction));
    postings.extend(sources.fund_transactions.iter().filter_map(post_fund_transaction));
    postings.extend(sources.trading_fees.iter().filter_map(post_trading_fee));
    postings.sort_by(|a, b| {
        (a.date, a.source, &a.id).cmp(&(b.date, b.source, &b.id))
    });
    postings
}

/// Folds postings into per-account (debits, credits) totals. BTreeMap keys
/// give the alphabetical row order for free.
fn fold_by_account(postings: &[Posting]) -> BTreeMap<String, (Decimal, Decimal)> {
    let mut accounts: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for posting in postings {
        let debit_side = accounts.entry(posting.debit.to_string()).or_default();
        debit_side.0 += posting.amount;
        let credit_side = accounts.entry(posting.credit.to_string()).or_default();
        credit_side.1 += posting.amount;
    }
    accounts
}

fn keep_all_invoices(_: &Invoice) -> bool {
    true
}

fn skip_cancelled_invoices(invoice: &Invoice) -> bool {
    invoice.status != InvoiceStatus::Cancelled
}

impl BooksServiceTrait for BooksService {
    fn get_journal(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>> {
        debug!("Deriving journal {}..{} for user {}", start, end, user_id);
        let sources = self
            .repository
            .fetch_sources(user_id, &SourceWindow::period(start, end))?;
        Ok(postings_sorted(&sources, keep_all_invoices)
            .into_iter()
            .map(Posting::into_journal_entry)
            .collect())
    }

    fn get_ledger(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerAccountRow>> {
        debug!("Deriving ledger {}..{} for user {}", start, end, user_id);
        let sources = self
            .repository
            .fetch_sources(user_id, &SourceWindow::period(start, end))?;
        let postings = postings_sorted(&sources, keep_all_invoices);
        Ok(fold_by_account(&postings)
            .into_iter()
            .map(|(account, (debits, credits))| LedgerAccountRow {
                account,
                debits,
                credits,
                balance: debits - credits,
            })
            .collect())
    }

    fn get_trial_balance(&self, user_id: &str, end: NaiveDate) -> Result<Vec<TrialBalanceRow>> {
        debug!("Deriving trial balance as of {} for user {}", end, user_id);
        let sources = self
            .repository
            .fetch_sources(user_id, &SourceWindow::since_inception(end))?;
        // Cancelled invoices are excluded here and only here; journal and
        // ledger keep them.
        let postings = postings_sorted(&sources, skip_cancelled_invoices);
        Ok(fold_by_account(&postings)
            .into_iter()
            .map(|(account, (debits, credits))| {
                if debits > credits {
                    TrialBalanceRow {
                        account,
                        debit: debits - credits,
                        credit: Decimal::ZERO,
                    }
                } else {
                    TrialBalanceRow {
                        account,
                        debit: Decimal::ZERO,
                        credit: credits - debits,
                    }
                }
            })
            .filter(|row| row.debit > Decimal::ZERO || row.credit > Decimal::ZERO)
            .collect())
    }

    fn get_balance_sheet(&self, user_id: &str, end: NaiveDate) -> Result<BalanceSheet> {
        debug!("Deriving balance sheet as of {} for user {}", end, user_id);
        let sources = self
            .repository
            .fetch_sources(user_id, &SourceWindow::since_inception(end))?;

        let cash: Decimal = sources
            .cash_transactions
            .iter()
            .map(|t| match t.transaction_type {
                CashTransactionType::Income => t.amount,
                CashTransactionType::Expense => -t.amount,
            })
            .sum();

        let accounts_receivable: Decimal = sources
            .invoices
            .iter()
            .filter(|inv| inv.invoice_type == InvoiceType::Income && inv.status.is_outstanding())
            .map(|inv| inv.total_amount)
            .sum();

        let accounts_payable: Decimal = sources
            .invoices
            .iter()
            .filter(|inv| inv.invoice_type == InvoiceType::Expense && inv.status.is_outstanding())
            .map(|inv| inv.total_amount)
            .sum();

        let mut investments = Decimal::ZERO;
        for transaction in &sources.stock_transactions {
            let amount = stock_gross_amount(transaction);
            match transaction.transaction_type {
                StockTransactionType::Buy => investments += amount,
                StockTransactionType::Sell => investments -= amount,
                StockTransactionType::Dividend => {}
            }
        }
        for transaction in &sources.fund_transactions {
            let amount = fund_gross_amount(transaction);
            match transaction.transaction_type {
                FundTransactionType::Invest => investments += amount,
                FundTransactionType::Withdraw => investments -= amount,
            }
        }

        let current_assets_total = cash + accounts_receivable;
        let total_assets = current_assets_total + investments;
        let total_liabilities = accounts_payable;
        let retained_earnings = total_assets - total_liabilities;

        Ok(BalanceSheet {
            assets: Assets {
                current_assets: CurrentAssets {
                    cash,
                    accounts_receivable,
                    inventory: Decimal::ZERO,
                    total: current_assets_total,
                },
                non_current_assets: NonCurrentAssets {
                    investments,
                    total: investments,
                },
                total_assets,
            },
            liabilities: Liabilities {
                current_liabilities: CurrentLiabilities {
                    accounts_payable,
                    total: accounts_payable,
                },
                total_liabilities,
            },
            equity: Equity {
                retained_earnings,
                total_equity: retained_earnings,
            },
        })
    }

    fn get_income_statement(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<IncomeStatement> {
        debug!(
            "Deriving income statement {}..{} for user {}",
            start, end, user_id
        );
        let sources = self
            .repository
            .fetch_sources(user_id, &SourceWindow::period(start, end))?;

        let mut sales_revenue = Decimal::ZERO;
        let mut operating_expenses = Decimal::ZERO;
        for transaction in &sources.cash_transactions {
            match transaction.transaction_type {
                CashTransactionType::Income => sales_revenue += transaction.amount,
                CashTransactionType::Expense => operating_expenses += transaction.amount,
            }
        }

        let mut invoice_revenue = Decimal::ZERO;
        let mut invoice_expenses = Decimal::ZERO;
        for invoice in &sources.invoices {
            if invoice.status != InvoiceStatus::Paid {
                continue;
            }
            match invoice.invoice_type {
                InvoiceType::Income => invoice_revenue += invoice.total_amount,
                InvoiceType::Expense => invoice_expenses += invoice.total_amount,
            }
        }

        let dividends: Decimal = sources
            .stock_transactions
            .iter()
            .filter(|t| t.transaction_type == StockTransactionType::Dividend)
            .map(stock_gross_amount)
            .sum();

        let mut trading_fees = Decimal::ZERO;
        let mut cgt = Decimal::ZERO;
        for fee in &sources.trading_fees {
            match fee.fee_type {
                FeeType::Cgt => cgt += fee.amount,
                // Everything that is not CGT counts as broker fees.
                _ => trading_fees += fee.amount,
            }
        }

        let total_revenue = sales_revenue + invoice_revenue + dividends;
        let total_expenses = operating_expenses + invoice_expenses + trading_fees + cgt;

        Ok(IncomeStatement {
            revenue: RevenueBreakdown {
                sales: sales_revenue + invoice_revenue,
                dividends,
                total_revenue,
            },
            expenses: ExpenseBreakdown {
                operating_expenses: operating_expenses + invoice_expenses,
                trading_fees,
                cgt,
                total_expenses,
            },
            net_income: total_revenue - total_expenses,
        })
    }

    fn get_cash_flow(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<CashFlowStatement> {
        debug!(
            "Deriving cash flow {}..{} for user {}",
            start, end, user_id
        );
        // Beginning cash needs every cash transaction before the period, so
        // the fetch runs since inception and the period split happens here.
        let sources = self
            .repository
            .fetch_sources(user_id, &SourceWindow::since_inception(end))?;
        let period = SourceWindow::period(start, end);

        let mut beginning_cash = Decimal::ZERO;
        let mut cash_inflow = Decimal::ZERO;
        let mut cash_outflow = Decimal::ZERO;
        for transaction in &sources.cash_transactions {
            let signed = match transaction.transaction_type {
                CashTransactionType::Income => transaction.amount,
                CashTransactionType::Expense => -transaction.amount,
            };
            if transaction.date < start {
                beginning_cash += signed;
            } else if period.contains(transaction.date) {
                if signed > Decimal::ZERO {
                    cash_inflow += transaction.amount;
                } else {
                    cash_outflow += transaction.amount;
                }
            }
        }

        let mut invoice_inflow = Decimal::ZERO;
        let mut invoice_outflow = Decimal::ZERO;
        for invoice in &sources.invoices {
            if invoice.status != InvoiceStatus::Paid || !period.contains(invoice.invoice_date) {
                continue;
            }
            match invoice.invoice_type {
                InvoiceType::Income => invoice_inflow += invoice.total_amount,
                InvoiceType::Expense => invoice_outflow += invoice.total_amount,
            }
        }

        let cash_from_operations = cash_inflow + invoice_inflow - cash_outflow - invoice_outflow;

        let mut investments_purchased = Decimal::ZERO;
        let mut investments_sold = Decimal::ZERO;
        for transaction in &sources.stock_transactions {
            if !period.contains(transaction.transaction_date) {
                continue;
            }
            let amount = stock_gross_amount(transaction);
            match transaction.transaction_type {
                StockTransactionType::Buy => investments_purchased += amount,
                StockTransactionType::Sell => investments_sold += amount,
                StockTransactionType::Dividend => {}
            }
        }
        for transaction in &sources.fund_transactions {
            if !period.contains(transaction.transaction_date) {
                continue;
            }
            let amount = fund_gross_amount(transaction);
            match transaction.transaction_type {
                FundTransactionType::Invest => investments_purchased += amount,
                FundTransactionType::Withdraw => investments_sold += amount,
            }
        }

        let cash_from_investing = investments_sold - investments_purchased;
        let cash_from_financing = Decimal::ZERO;
        let net_cash_flow = cash_from_operations + cash_from_investing + cash_from_financing;

        Ok(CashFlowStatement {
            operating_activities: OperatingActivities {
                cash_from_operations,
                total: cash_from_operations,
            },
            investing_activities: InvestingActivities {
                investments_purchased: -investments_purchased,
                investments_sold,
                total: cash_from_investing,
            },
            financing_activities: FinancingActivities {
                total: cash_from_financing,
            },
            net_cash_flow,
            beginning_cash,
            ending_cash: beginning_cash + net_cash_flow,
        })
    }
}
