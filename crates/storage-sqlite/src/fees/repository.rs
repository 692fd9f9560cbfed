//! SQLite-backed implementation of the trading fee repository.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use finbooks_core::errors::Result;
use finbooks_core::fees::{FeeRepositoryTrait, NewTradingFee, TradingFee};

use super::model::TradingFeeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::trading_fees;

pub struct FeeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FeeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FeeRepositoryTrait for FeeRepository {
    async fn create(&self, new_fee: NewTradingFee) -> Result<TradingFee> {
        self.writer
            .exec(move |conn| {
                let fee = TradingFee {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_fee.user_id,
                    fee_type: new_fee.fee_type,
                    amount: new_fee.amount,
                    fee_date: new_fee.fee_date,
                    description: new_fee.description,
                };
                diesel::insert_into(trading_fees::table)
                    .values(TradingFeeDB::from(&fee))
                    .execute(conn)
                    .into_core()?;
                Ok(fee)
            })
            .await
    }

    async fn delete(&self, fee_id: &str) -> Result<usize> {
        let fee_id = fee_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(trading_fees::table.find(&fee_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn list(&self, user_id: &str) -> Result<Vec<TradingFee>> {
        let mut conn = get_connection(&self.pool)?;
        trading_fees::table
            .filter(trading_fees::user_id.eq(user_id))
            .order(trading_fees::fee_date.desc())
            .load::<TradingFeeDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(TradingFee::try_from)
            .collect()
    }
}
