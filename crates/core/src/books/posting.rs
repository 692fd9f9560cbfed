//! The event-to-posting mapping table.
//!
//! Pure functions from raw events to balanced debit/credit postings. One
//! posting per event; dividend stock rows produce none because they carry no
//! cash leg at recording time. Trading fees map as independent entries, never
//! netted into the trade they relate to.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::books_model::{JournalEntry, LedgerAccount};
use crate::cash::{CashTransaction, CashTransactionType};
use crate::fees::TradingFee;
use crate::funds::{FundTransactionType, MutualFundTransaction};
use crate::invoices::{Invoice, InvoiceStatus, InvoiceType};
use crate::stocks::{StockTransaction, StockTransactionType};

/// Which of the five raw sources a posting came from. The order here is the
/// deterministic tie-break for same-date journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceKind {
    CashTransaction,
    Invoice,
    StockTransaction,
    FundTransaction,
    TradingFee,
}

/// A balanced debit/credit pair derived from one raw event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub debit: LedgerAccount,
    pub credit: LedgerAccount,
    pub amount: Decimal,
    pub source: SourceKind,
}

impl Posting {
    /// Renders the posting as a journal line with flat account names.
    pub fn into_journal_entry(self) -> JournalEntry {
        JournalEntry {
            id: self.id,
            date: self.date,
            description: self.description,
            debit_account: self.debit.to_string(),
            credit_account: self.credit.to_string(),
            amount: self.amount,
        }
    }
}

/// Gross trade value of a stock event.
pub fn stock_gross_amount(transaction: &StockTransaction) -> Decimal {
    transaction.shares * transaction.price_per_share
}

/// Gross flow value of a fund event: `units * nav` when both are tracked,
/// otherwise the recorded amount.
pub fn fund_gross_amount(transaction: &MutualFundTransaction) -> Decimal {
    match (transaction.units, transaction.nav) {
        (Some(units), Some(nav)) => units * nav,
        _ => transaction.amount,
    }
}

/// Cash income debits cash against a categorized revenue account; expense is
/// the mirror.
pub fn post_cash_transaction(transaction: &CashTransaction) -> Option<Posting> {
    let (debit, credit, fallback) = match transaction.transaction_type {
        CashTransactionType::Income => (
            LedgerAccount::Cash,
            LedgerAccount::Revenue(transaction.category.clone()),
            format!("{} income", transaction.category),
        ),
        CashTransactionType::Expense => (
            LedgerAccount::Expense(transaction.category.clone()),
            LedgerAccount::Cash,
            format!("{} expense", transaction.category),
        ),
    };
    Some(Posting {
        id: format!("txn-{}", transaction.id),
        date: transaction.date,
        description: transaction.description.clone().unwrap_or(fallback),
        debit,
        credit,
        amount: transaction.amount,
        source: SourceKind::CashTransaction,
    })
}

/// Paid invoices settle against cash; unpaid ones sit on the receivable or
/// payable account. Cancelled invoices fall into the unpaid branch here; only
/// the trial balance fold excludes them.
pub fn post_invoice(invoice: &Invoice) -> Option<Posting> {
    let (debit, credit, description) = match (invoice.invoice_type, invoice.status) {
        (InvoiceType::Income, InvoiceStatus::Paid) => (
            LedgerAccount::Cash,
            LedgerAccount::Revenue("Invoiced".to_string()),
            format!(
                "Invoice #{} - {} (Paid)",
                invoice.invoice_number, invoice.client_name
            ),
        ),
        (InvoiceType::Income, _) => (
            LedgerAccount::AccountsReceivable,
            LedgerAccount::Revenue("Invoiced".to_string()),
            format!("Invoice #{} - {}", invoice.invoice_number, invoice.client_name),
        ),
        (InvoiceType::Expense, InvoiceStatus::Paid) => (
            LedgerAccount::Expense("Invoiced".to_string()),
            LedgerAccount::Cash,
            format!(
                "Expense Invoice #{} - {} (Paid)",
                invoice.invoice_number, invoice.client_name
            ),
        ),
        (InvoiceType::Expense, _) => (
            LedgerAccount::Expense("Invoiced".to_string()),
            LedgerAccount::AccountsPayable,
            format!(
                "Expense Invoice #{} - {}",
                invoice.invoice_number, invoice.client_name
            ),
        ),
    };
    Some(Posting {
        id: format!("inv-{}", invoice.id),
        date: invoice.invoice_date,
        description,
        debit,
        credit,
        amount: invoice.total_amount,
        source: SourceKind::Invoice,
    })
}

/// Buys move cash into the stock investment account; sells move it back at
/// gross trade value (realized P&L stays on the event row). Dividend rows
/// have no posting.
pub fn post_stock_transaction(transaction: &StockTransaction) -> Option<Posting> {
    let amount = stock_gross_amount(transaction);
    let (debit, credit, description) = match transaction.transaction_type {
        StockTransactionType::Buy => (
            LedgerAccount::InvestmentsStocks,
            LedgerAccount::Cash,
            format!(
                "Buy {} shares of {}",
                transaction.shares, transaction.symbol
            ),
        ),
        StockTransactionType::Sell => (
            LedgerAccount::Cash,
            LedgerAccount::InvestmentsStocks,
            format!(
                "Sell {} shares of {}",
                transaction.shares, transaction.symbol
            ),
        ),
        StockTransactionType::Dividend => return None,
    };
    Some(Posting {
        id: format!("stock-{}", transaction.id),
        date: transaction.transaction_date,
        description,
        debit,
        credit,
        amount,
        source: SourceKind::StockTransaction,
    })
}

/// Fund flows mirror the stock legs against the mutual fund investment
/// account.
pub fn post_fund_transaction(transaction: &MutualFundTransaction) -> Option<Posting> {
    let amount = fund_gross_amount(transaction);
    let (debit, credit, description) = match transaction.transaction_type {
        FundTransactionType::Invest => (
            LedgerAccount::InvestmentsMutualFunds,
            LedgerAccount::Cash,
            format!(
                "Invest {} in {}",
                transaction.amount, transaction.fund_name
            ),
        ),
        FundTransactionType::Withdraw => (
            LedgerAccount::Cash,
            LedgerAccount::InvestmentsMutualFunds,
            format!(
                "Withdraw {} from {}",
                transaction.amount, transaction.fund_name
            ),
        ),
    };
    Some(Posting {
        id: format!("mf-{}", transaction.id),
        date: transaction.transaction_date,
        description,
        debit,
        credit,
        amount,
        source: SourceKind::FundTransaction,
    })
}

/// Every fee is a categorized expense paid from cash.
pub fn post_trading_fee(fee: &TradingFee) -> Option<Posting> {
    Some(Posting {
        id: format!("fee-{}", fee.id),
        date: fee.fee_date,
        description: fee
            .description
            .clone()
            .unwrap_or_else(|| format!("Trading fee - {}", fee.fee_type)),
        debit: LedgerAccount::Expense(fee.fee_type.as_str().to_string()),
        credit: LedgerAccount::Cash,
        amount: fee.amount,
        source: SourceKind::TradingFee,
    })
}
