//! Books repository and service traits.

use chrono::NaiveDate;

use super::books_model::{
    BalanceSheet, CashFlowStatement, IncomeStatement, JournalEntry, LedgerAccountRow,
    TrialBalanceRow,
};
use crate::cash::CashTransaction;
use crate::errors::Result;
use crate::fees::TradingFee;
use crate::funds::MutualFundTransaction;
use crate::invoices::Invoice;
use crate::stocks::StockTransaction;

/// Date window for a source fetch. `start: None` means "since inception";
/// both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl SourceWindow {
    pub fn since_inception(end: NaiveDate) -> Self {
        Self { start: None, end }
    }

    pub fn period(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && date <= self.end
    }
}

/// All five raw report sources, read as one consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct BookSources {
    pub cash_transactions: Vec<CashTransaction>,
    pub invoices: Vec<Invoice>,
    pub stock_transactions: Vec<StockTransaction>,
    pub fund_transactions: Vec<MutualFundTransaction>,
    pub trading_fees: Vec<TradingFee>,
}

/// Trait defining the contract for the report source fetch.
///
/// One call returns all five sources; the implementation reads them inside a
/// single read transaction so a mutation committing mid-report cannot leave
/// the report with a partial view. Any source failure fails the whole fetch.
pub trait BooksRepositoryTrait: Send + Sync {
    fn fetch_sources(&self, user_id: &str, window: &SourceWindow) -> Result<BookSources>;
}

/// Trait defining the contract for report derivation.
pub trait BooksServiceTrait: Send + Sync {
    /// Chronological journal over `[start, end]`.
    fn get_journal(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>>;

    /// Per-account debit/credit totals over `[start, end]`.
    fn get_ledger(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerAccountRow>>;

    /// Netted per-account totals since inception up to `end`.
    fn get_trial_balance(&self, user_id: &str, end: NaiveDate) -> Result<Vec<TrialBalanceRow>>;

    /// Point-in-time balance sheet as of `end`.
    fn get_balance_sheet(&self, user_id: &str, end: NaiveDate) -> Result<BalanceSheet>;

    /// Income statement over `[start, end]`.
    fn get_income_statement(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<IncomeStatement>;

    /// Cash flow statement over `[start, end]`.
    fn get_cash_flow(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<CashFlowStatement>;
}
