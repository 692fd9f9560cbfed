//! Database models for cash accounts and transactions.

use chrono::NaiveDate;
use diesel::prelude::*;

use finbooks_core::cash::{CashAccount, CashTransaction};
use finbooks_core::errors::{Error, Result};

use crate::utils::{decimal_to_f64, f64_to_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::cash_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CashAccountDB {
    pub id: String,
    pub user_id: String,
    pub balance: f64,
}

impl From<CashAccountDB> for CashAccount {
    fn from(db: CashAccountDB) -> Self {
        CashAccount {
            id: db.id,
            user_id: db.user_id,
            balance: f64_to_decimal(db.balance),
        }
    }
}

impl From<&CashAccount> for CashAccountDB {
    fn from(account: &CashAccount) -> Self {
        CashAccountDB {
            id: account.id.clone(),
            user_id: account.user_id.clone(),
            balance: decimal_to_f64(account.balance),
        }
    }
}

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::cash_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CashTransactionDB {
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl TryFrom<CashTransactionDB> for CashTransaction {
    type Error = Error;

    fn try_from(db: CashTransactionDB) -> Result<Self> {
        Ok(CashTransaction {
            id: db.id,
            user_id: db.user_id,
            transaction_type: db.transaction_type.parse()?,
            amount: f64_to_decimal(db.amount),
            category: db.category,
            description: db.description,
            date: db.date,
        })
    }
}

impl From<&CashTransaction> for CashTransactionDB {
    fn from(transaction: &CashTransaction) -> Self {
        CashTransactionDB {
            id: transaction.id.clone(),
            user_id: transaction.user_id.clone(),
            transaction_type: transaction.transaction_type.as_str().to_string(),
            amount: decimal_to_f64(transaction.amount),
            category: transaction.category.clone(),
            description: transaction.description.clone(),
            date: transaction.date,
        }
    }
}
