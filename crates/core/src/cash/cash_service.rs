use log::debug;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::cash_model::{CashAccount, CashAdjustment, CashTransaction, NewCashTransaction};
use super::cash_traits::{CashRepositoryTrait, CashServiceTrait};
use crate::errors::Result;

/// Service for the cash account and cash transactions.
pub struct CashService {
    repository: Arc<dyn CashRepositoryTrait>,
}

impl CashService {
    pub fn new(repository: Arc<dyn CashRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CashServiceTrait for CashService {
    async fn get_account(&self, user_id: &str) -> Result<CashAccount> {
        self.repository.get_or_create_account(user_id).await
    }

    async fn deposit(
        &self,
        user_id: &str,
        amount: Decimal,
        date: Option<NaiveDate>,
    ) -> Result<CashAccount> {
        debug!("Depositing {} for user {}", amount, user_id);
        let adjustment = CashAdjustment {
            user_id: user_id.to_string(),
            amount,
            date,
        };
        adjustment.validate()?;
        self.repository.execute_deposit(adjustment).await
    }

    async fn withdraw(
        &self,
        user_id: &str,
        amount: Decimal,
        date: Option<NaiveDate>,
    ) -> Result<CashAccount> {
        debug!("Withdrawing {} for user {}", amount, user_id);
        let adjustment = CashAdjustment {
            user_id: user_id.to_string(),
            amount,
            date,
        };
        adjustment.validate()?;
        self.repository.execute_withdrawal(adjustment).await
    }

    async fn record_transaction(
        &self,
        new_transaction: NewCashTransaction,
    ) -> Result<CashTransaction> {
        debug!(
            "Recording {} transaction of {} for user {}",
            new_transaction.transaction_type, new_transaction.amount, new_transaction.user_id
        );
        new_transaction.validate()?;
        self.repository.add_transaction(new_transaction).await
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<CashTransaction>> {
        self.repository.list_transactions(user_id)
    }
}
