//! Database models for mutual fund positions, flow events and the
//! revaluation trail.

use chrono::NaiveDate;
use diesel::prelude::*;

use finbooks_core::errors::{Error, Result};
use finbooks_core::funds::{FundValueHistory, MutualFundPosition, MutualFundTransaction};

use crate::utils::{decimal_to_f64, f64_to_decimal, opt_decimal_to_f64, opt_f64_to_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::mutual_fund_positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MutualFundPositionDB {
    pub id: String,
    pub user_id: String,
    pub fund_name: String,
    pub fund_type: Option<String>,
    pub total_invested: f64,
    pub current_value: f64,
    pub units: Option<f64>,
    pub nav: Option<f64>,
    pub profit_loss: f64,
}

impl From<MutualFundPositionDB> for MutualFundPosition {
    fn from(db: MutualFundPositionDB) -> Self {
        MutualFundPosition {
            id: db.id,
            user_id: db.user_id,
            fund_name: db.fund_name,
            fund_type: db.fund_type,
            total_invested: f64_to_decimal(db.total_invested),
            current_value: f64_to_decimal(db.current_value),
            units: opt_f64_to_decimal(db.units),
            nav: opt_f64_to_decimal(db.nav),
            profit_loss: f64_to_decimal(db.profit_loss),
        }
    }
}

impl From<&MutualFundPosition> for MutualFundPositionDB {
    fn from(position: &MutualFundPosition) -> Self {
        MutualFundPositionDB {
            id: position.id.clone(),
            user_id: position.user_id.clone(),
            fund_name: position.fund_name.clone(),
            fund_type: position.fund_type.clone(),
            total_invested: decimal_to_f64(position.total_invested),
            current_value: decimal_to_f64(position.current_value),
            units: opt_decimal_to_f64(position.units),
            nav: opt_decimal_to_f64(position.nav),
            profit_loss: decimal_to_f64(position.profit_loss),
        }
    }
}

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::mutual_fund_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MutualFundTransactionDB {
    pub id: String,
    pub user_id: String,
    pub fund_name: String,
    pub transaction_type: String,
    pub amount: f64,
    pub units: Option<f64>,
    pub nav: Option<f64>,
    pub profit_loss: Option<f64>,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
}

impl TryFrom<MutualFundTransactionDB> for MutualFundTransaction {
    type Error = Error;

    fn try_from(db: MutualFundTransactionDB) -> Result<Self> {
        Ok(MutualFundTransaction {
            id: db.id,
            user_id: db.user_id,
            fund_name: db.fund_name,
            transaction_type: db.transaction_type.parse()?,
            amount: f64_to_decimal(db.amount),
            units: opt_f64_to_decimal(db.units),
            nav: opt_f64_to_decimal(db.nav),
            profit_loss: opt_f64_to_decimal(db.profit_loss),
            transaction_date: db.transaction_date,
            description: db.description,
        })
    }
}

impl From<&MutualFundTransaction> for MutualFundTransactionDB {
    fn from(transaction: &MutualFundTransaction) -> Self {
        MutualFundTransactionDB {
            id: transaction.id.clone(),
            user_id: transaction.user_id.clone(),
            fund_name: transaction.fund_name.clone(),
            transaction_type: transaction.transaction_type.as_str().to_string(),
            amount: decimal_to_f64(transaction.amount),
            units: opt_decimal_to_f64(transaction.units),
            nav: opt_decimal_to_f64(transaction.nav),
            profit_loss: opt_decimal_to_f64(transaction.profit_loss),
            transaction_date: transaction.transaction_date,
            description: transaction.description.clone(),
        }
    }
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::mutual_fund_value_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FundValueHistoryDB {
    pub id: String,
    pub user_id: String,
    pub fund_name: String,
    pub previous_value: f64,
    pub new_value: f64,
    pub value_change: f64,
    pub value_change_percentage: f64,
    pub total_invested: f64,
    pub profit_loss: f64,
    pub update_date: NaiveDate,
    pub notes: Option<String>,
}

impl From<FundValueHistoryDB> for FundValueHistory {
    fn from(db: FundValueHistoryDB) -> Self {
        FundValueHistory {
            id: db.id,
            user_id: db.user_id,
            fund_name: db.fund_name,
            previous_value: f64_to_decimal(db.previous_value),
            new_value: f64_to_decimal(db.new_value),
            value_change: f64_to_decimal(db.value_change),
            value_change_percentage: f64_to_decimal(db.value_change_percentage),
            total_invested: f64_to_decimal(db.total_invested),
            profit_loss: f64_to_decimal(db.profit_loss),
            update_date: db.update_date,
            notes: db.notes,
        }
    }
}

impl From<&FundValueHistory> for FundValueHistoryDB {
    fn from(entry: &FundValueHistory) -> Self {
        FundValueHistoryDB {
            id: entry.id.clone(),
            user_id: entry.user_id.clone(),
            fund_name: entry.fund_name.clone(),
            previous_value: decimal_to_f64(entry.previous_value),
            new_value: decimal_to_f64(entry.new_value),
            value_change: decimal_to_f64(entry.value_change),
            value_change_percentage: decimal_to_f64(entry.value_change_percentage),
            total_invested: decimal_to_f64(entry.total_invested),
            profit_loss: decimal_to_f64(entry.profit_loss),
            update_date: entry.update_date,
            notes: entry.notes.clone(),
        }
    }
}
