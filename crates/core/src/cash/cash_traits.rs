//! Cash repository and service traits.
//!
//! These traits define the contract for cash operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::cash_model::{CashAccount, CashAdjustment, CashTransaction, NewCashTransaction};
use crate::errors::Result;

/// Trait defining the contract for cash persistence.
///
/// Mutations are coarse on purpose: a deposit or withdrawal updates the
/// account balance and appends its mirror transaction row as one atomic unit.
#[async_trait]
pub trait CashRepositoryTrait: Send + Sync {
    /// Returns the user's cash account, creating it with a zero balance on
    /// first access.
    async fn get_or_create_account(&self, user_id: &str) -> Result<CashAccount>;

    /// Adds to the balance and appends the `income` mirror row.
    async fn execute_deposit(&self, adjustment: CashAdjustment) -> Result<CashAccount>;

    /// Subtracts from the balance and appends the `expense` mirror row.
    ///
    /// Fails without writing anything when the balance does not cover the
    /// amount.
    async fn execute_withdrawal(&self, adjustment: CashAdjustment) -> Result<CashAccount>;

    /// Appends a plain bookkeeping transaction row.
    async fn add_transaction(&self, new_transaction: NewCashTransaction)
        -> Result<CashTransaction>;

    /// Lists all transaction rows for the user, newest first.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<CashTransaction>>;
}

/// Trait defining the contract for cash service operations.
#[async_trait]
pub trait CashServiceTrait: Send + Sync {
    /// Returns the user's cash account, creating it on first access.
    async fn get_account(&self, user_id: &str) -> Result<CashAccount>;

    /// Deposits `amount` into the cash account.
    async fn deposit(
        &self,
        user_id: &str,
        amount: Decimal,
        date: Option<NaiveDate>,
    ) -> Result<CashAccount>;

    /// Withdraws `amount` from the cash account.
    async fn withdraw(
        &self,
        user_id: &str,
        amount: Decimal,
        date: Option<NaiveDate>,
    ) -> Result<CashAccount>;

    /// Records an income/expense bookkeeping row.
    async fn record_transaction(
        &self,
        new_transaction: NewCashTransaction,
    ) -> Result<CashTransaction>;

    /// Lists all transaction rows for the user.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<CashTransaction>>;
}
