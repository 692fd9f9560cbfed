//! Books module - event-to-journal mapping and on-demand derivation of the
//! journal, ledger, trial balance, and the three financial statements.
//!
//! Nothing in this module is persisted. Every report is recomputed from the
//! five raw sources on each request.

mod books_model;
mod books_service;
mod books_traits;
mod posting;

#[cfg(test)]
mod books_service_tests;

// Re-export the public interface
pub use books_model::{
    Assets, BalanceSheet, CashFlowStatement, CurrentAssets, CurrentLiabilities, Equity,
    ExpenseBreakdown, FinancingActivities, IncomeStatement, InvestingActivities, JournalEntry,
    LedgerAccount, LedgerAccountRow, Liabilities, NonCurrentAssets, OperatingActivities,
    RevenueBreakdown, TrialBalanceRow,
};
pub use books_service::BooksService;
pub use books_traits::{BookSources, BooksRepositoryTrait, BooksServiceTrait, SourceWindow};
pub use posting::{fund_gross_amount, stock_gross_amount, Posting, SourceKind};
