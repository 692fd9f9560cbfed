//! SQLite-backed implementation of the cash repository.
//!
//! The shared `load_or_create_account` / `save_account` / `insert_transaction`
//! helpers run on a caller-supplied connection so the stock and fund
//! repositories can settle cash inside their own write transactions.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use finbooks_core::cash::{
    CashAccount, CashAdjustment, CashRepositoryTrait, CashTransaction, CashTransactionType,
    NewCashTransaction, CASH_DEPOSIT_CATEGORY, CASH_WITHDRAWAL_CATEGORY,
};
use finbooks_core::errors::Result;

use super::model::{CashAccountDB, CashTransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{cash_accounts, cash_transactions};

pub struct CashRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CashRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads the user's cash account, inserting a zero-balance row on first
/// access.
pub(crate) fn load_or_create_account(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<CashAccount> {
    let existing = cash_accounts::table
        .filter(cash_accounts::user_id.eq(user_id))
        .first::<CashAccountDB>(conn)
        .optional()
        .into_core()?;

    let row = match existing {
        Some(row) => row,
        None => {
            let row = CashAccountDB {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                balance: 0.0,
            };
            diesel::insert_into(cash_accounts::table)
                .values(&row)
                .execute(conn)
                .into_core()?;
            row
        }
    };
    Ok(CashAccount::from(row))
}

/// Persists the account's current balance.
pub(crate) fn save_account(conn: &mut SqliteConnection, account: &CashAccount) -> Result<()> {
    diesel::update(cash_accounts::table.find(&account.id))
        .set(CashAccountDB::from(account))
        .execute(conn)
        .into_core()?;
    Ok(())
}

/// Appends one transaction row.
pub(crate) fn insert_transaction(
    conn: &mut SqliteConnection,
    transaction: &CashTransaction,
) -> Result<()> {
    diesel::insert_into(cash_transactions::table)
        .values(CashTransactionDB::from(transaction))
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl CashRepositoryTrait for CashRepository {
    async fn get_or_create_account(&self, user_id: &str) -> Result<CashAccount> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| load_or_create_account(conn, &user_id))
            .await
    }

    async fn execute_deposit(&self, adjustment: CashAdjustment) -> Result<CashAccount> {
        self.writer
            .exec(move |conn| {
                let mut account = load_or_create_account(conn, &adjustment.user_id)?;
                account.apply_deposit(adjustment.amount);
                save_account(conn, &account)?;

                let mirror = CashTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: adjustment.user_id.clone(),
                    transaction_type: CashTransactionType::Income,
                    amount: adjustment.amount,
                    category: CASH_DEPOSIT_CATEGORY.to_string(),
                    description: None,
                    date: adjustment.effective_date(),
                };
                insert_transaction(conn, &mirror)?;

                Ok(account)
            })
            .await
    }

    async fn execute_withdrawal(&self, adjustment: CashAdjustment) -> Result<CashAccount> {
        self.writer
            .exec(move |conn| {
                let mut account = load_or_create_account(conn, &adjustment.user_id)?;
                account.apply_withdrawal(adjustment.amount)?;
                save_account(conn, &account)?;

                let mirror = CashTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: adjustment.user_id.clone(),
                    transaction_type: CashTransactionType::Expense,
                    amount: adjustment.amount,
                    category: CASH_WITHDRAWAL_CATEGORY.to_string(),
                    description: None,
                    date: adjustment.effective_date(),
                };
                insert_transaction(conn, &mirror)?;

                Ok(account)
            })
            .await
    }

    async fn add_transaction(
        &self,
        new_transaction: NewCashTransaction,
    ) -> Result<CashTransaction> {
        self.writer
            .exec(move |conn| {
                let transaction = CashTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_transaction.user_id,
                    transaction_type: new_transaction.transaction_type,
                    amount: new_transaction.amount,
                    category: new_transaction.category,
                    description: new_transaction.description,
                    date: new_transaction.date,
                };
                insert_transaction(conn, &transaction)?;
                Ok(transaction)
            })
            .await
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<CashTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        cash_transactions::table
            .filter(cash_transactions::user_id.eq(user_id))
            .order(cash_transactions::date.desc())
            .load::<CashTransactionDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(CashTransaction::try_from)
            .collect()
    }
}
