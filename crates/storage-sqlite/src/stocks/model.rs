//! Database models for stock positions and trade events.

use chrono::NaiveDate;
use diesel::prelude::*;

use finbooks_core::errors::{Error, Result};
use finbooks_core::stocks::{StockPosition, StockTransaction};

use crate::utils::{decimal_to_f64, f64_to_decimal, opt_decimal_to_f64, opt_f64_to_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::stock_positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockPositionDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub company_name: String,
    pub total_shares: f64,
    pub avg_buy_price: f64,
    pub total_invested: f64,
}

impl From<StockPositionDB> for StockPosition {
    fn from(db: StockPositionDB) -> Self {
        StockPosition {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            company_name: db.company_name,
            total_shares: f64_to_decimal(db.total_shares),
            avg_buy_price: f64_to_decimal(db.avg_buy_price),
            total_invested: f64_to_decimal(db.total_invested),
        }
    }
}

impl From<&StockPosition> for StockPositionDB {
    fn from(position: &StockPosition) -> Self {
        StockPositionDB {
            id: position.id.clone(),
            user_id: position.user_id.clone(),
            symbol: position.symbol.clone(),
            company_name: position.company_name.clone(),
            total_shares: decimal_to_f64(position.total_shares),
            avg_buy_price: decimal_to_f64(position.avg_buy_price),
            total_invested: decimal_to_f64(position.total_invested),
        }
    }
}

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::stock_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockTransactionDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub company_name: String,
    pub transaction_type: String,
    pub shares: f64,
    pub price_per_share: f64,
    pub total_amount: f64,
    pub profit_loss: Option<f64>,
    pub avg_cost_basis: Option<f64>,
    pub transaction_date: NaiveDate,
}

impl TryFrom<StockTransactionDB> for StockTransaction {
    type Error = Error;

    fn try_from(db: StockTransactionDB) -> Result<Self> {
        Ok(StockTransaction {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            company_name: db.company_name,
            transaction_type: db.transaction_type.parse()?,
            shares: f64_to_decimal(db.shares),
            price_per_share: f64_to_decimal(db.price_per_share),
            total_amount: f64_to_decimal(db.total_amount),
            profit_loss: opt_f64_to_decimal(db.profit_loss),
            avg_cost_basis: opt_f64_to_decimal(db.avg_cost_basis),
            transaction_date: db.transaction_date,
        })
    }
}

impl From<&StockTransaction> for StockTransactionDB {
    fn from(transaction: &StockTransaction) -> Self {
        StockTransactionDB {
            id: transaction.id.clone(),
            user_id: transaction.user_id.clone(),
            symbol: transaction.symbol.clone(),
            company_name: transaction.company_name.clone(),
            transaction_type: transaction.transaction_type.as_str().to_string(),
            shares: decimal_to_f64(transaction.shares),
            price_per_share: decimal_to_f64(transaction.price_per_share),
            total_amount: decimal_to_f64(transaction.total_amount),
            profit_loss: opt_decimal_to_f64(transaction.profit_loss),
            avg_cost_basis: opt_decimal_to_f64(transaction.avg_cost_basis),
            transaction_date: transaction.transaction_date,
        }
    }
}
