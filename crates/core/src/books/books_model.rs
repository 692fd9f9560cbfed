//! Derived report shapes. None of these are ever persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A ledger account. The set is closed: accounts are not a user-defined
/// chart but the fixed buckets the journal mapper writes to, with the
/// revenue/expense category carried as the display suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerAccount {
    Cash,
    AccountsReceivable,
    AccountsPayable,
    Revenue(String),
    Expense(String),
    InvestmentsStocks,
    InvestmentsMutualFunds,
}

impl std::fmt::Display for LedgerAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerAccount::Cash => write!(f, "Cash"),
            LedgerAccount::AccountsReceivable => write!(f, "Accounts Receivable"),
            LedgerAccount::AccountsPayable => write!(f, "Accounts Payable"),
            LedgerAccount::Revenue(category) => write!(f, "Revenue - {category}"),
            LedgerAccount::Expense(category) => write!(f, "Expense - {category}"),
            LedgerAccount::InvestmentsStocks => write!(f, "Investments - Stocks"),
            LedgerAccount::InvestmentsMutualFunds => write!(f, "Investments - Mutual Funds"),
        }
    }
}

/// One balanced double-entry line in the chronological journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
}

/// Per-account totals over a window, with `balance = debits - credits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccountRow {
    pub account: String,
    pub debits: Decimal,
    pub credits: Decimal,
    pub balance: Decimal,
}

/// A netted trial balance row. Exactly one side is nonzero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    pub account: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Point-in-time balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    pub current_assets: CurrentAssets,
    pub non_current_assets: NonCurrentAssets,
    pub total_assets: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAssets {
    pub cash: Decimal,
    pub accounts_receivable: Decimal,
    /// Inventory is not tracked; always zero.
    pub inventory: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonCurrentAssets {
    pub investments: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liabilities {
    pub current_liabilities: CurrentLiabilities,
    pub total_liabilities: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLiabilities {
    pub accounts_payable: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equity {
    /// Plug figure: assets minus liabilities, not independently computed.
    pub retained_earnings: Decimal,
    pub total_equity: Decimal,
}

/// Period income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub revenue: RevenueBreakdown,
    pub expenses: ExpenseBreakdown,
    pub net_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    /// Cash sales plus paid income invoices.
    pub sales: Decimal,
    pub dividends: Decimal,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    /// Cash expenses plus paid expense invoices.
    pub operating_expenses: Decimal,
    /// All non-CGT trading fees.
    pub trading_fees: Decimal,
    pub cgt: Decimal,
    pub total_expenses: Decimal,
}

/// Period cash flow statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    pub operating_activities: OperatingActivities,
    pub investing_activities: InvestingActivities,
    pub financing_activities: FinancingActivities,
    pub net_cash_flow: Decimal,
    pub beginning_cash: Decimal,
    pub ending_cash: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingActivities {
    pub cash_from_operations: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestingActivities {
    /// Reported as a negative outflow.
    pub investments_purchased: Decimal,
    pub investments_sold: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingActivities {
    /// Financing is not modeled; always zero.
    pub total: Decimal,
}
