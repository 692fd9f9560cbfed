//! Database model for trading fees.

use chrono::NaiveDate;
use diesel::prelude::*;

use finbooks_core::errors::{Error, Result};
use finbooks_core::fees::TradingFee;

use crate::utils::{decimal_to_f64, f64_to_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::trading_fees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradingFeeDB {
    pub id: String,
    pub user_id: String,
    pub fee_type: String,
    pub amount: f64,
    pub fee_date: NaiveDate,
    pub description: Option<String>,
}

impl TryFrom<TradingFeeDB> for TradingFee {
    type Error = Error;

    fn try_from(db: TradingFeeDB) -> Result<Self> {
        Ok(TradingFee {
            id: db.id,
            user_id: db.user_id,
            fee_type: db.fee_type.parse()?,
            amount: f64_to_decimal(db.amount),
            fee_date: db.fee_date,
            description: db.description,
        })
    }
}

impl From<&TradingFee> for TradingFeeDB {
    fn from(fee: &TradingFee) -> Self {
        TradingFeeDB {
            id: fee.id.clone(),
            user_id: fee.user_id.clone(),
            fee_type: fee.fee_type.as_str().to_string(),
            amount: decimal_to_f64(fee.amount),
            fee_date: fee.fee_date,
            description: fee.description.clone(),
        }
    }
}
