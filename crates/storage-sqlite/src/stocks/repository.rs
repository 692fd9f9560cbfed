//! SQLite-backed implementation of the stock repository.
//!
//! Buys and sells run as one write job: the cash settlement, the position
//! upsert (or delete at zero shares) and the trade event append commit
//! together or not at all.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use finbooks_core::errors::Result;
use finbooks_core::stocks::{
    BuyOrder, BuyOutcome, DividendRecord, SellOrder, SellOutcome, StockPosition,
    StockRepositoryTrait, StockTransaction, StockTransactionType,
};

use super::model::{StockPositionDB, StockTransactionDB};
use crate::cash::repository::{load_or_create_account, save_account};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{stock_positions, stock_transactions};

pub struct StockRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StockRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_position(
    conn: &mut SqliteConnection,
    user_id: &str,
    symbol: &str,
) -> Result<Option<StockPosition>> {
    let row = stock_positions::table
        .filter(stock_positions::user_id.eq(user_id))
        .filter(stock_positions::symbol.eq(symbol))
        .first::<StockPositionDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(StockPosition::from))
}

fn insert_event(conn: &mut SqliteConnection, transaction: &StockTransaction) -> Result<()> {
    diesel::insert_into(stock_transactions::table)
        .values(StockTransactionDB::from(transaction))
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl StockRepositoryTrait for StockRepository {
    async fn execute_buy(&self, order: BuyOrder) -> Result<BuyOutcome> {
        self.writer
            .exec(move |conn| {
                let total = order.total_amount();
                let date = order.effective_date();

                // Insufficient funds rejects before anything is written.
                let mut account = load_or_create_account(conn, &order.user_id)?;
                account.apply_withdrawal(total)?;
                save_account(conn, &account)?;

                let position = match load_position(conn, &order.user_id, &order.symbol)? {
                    Some(mut position) => {
                        position.apply_buy(order.shares, order.price_per_share);
                        diesel::update(stock_positions::table.find(&position.id))
                            .set(StockPositionDB::from(&position))
                            .execute(conn)
                            .into_core()?;
                        position
                    }
                    None => {
                        let position = StockPosition {
                            id: Uuid::new_v4().to_string(),
                            user_id: order.user_id.clone(),
                            symbol: order.symbol.clone(),
                            company_name: order.company_name.clone(),
                            total_shares: order.shares,
                            avg_buy_price: order.price_per_share,
                            total_invested: total,
                        };
                        diesel::insert_into(stock_positions::table)
                            .values(StockPositionDB::from(&position))
                            .execute(conn)
                            .into_core()?;
                        position
                    }
                };

                let transaction = StockTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: order.user_id.clone(),
                    symbol: order.symbol.clone(),
                    company_name: position.company_name.clone(),
                    transaction_type: StockTransactionType::Buy,
                    shares: order.shares,
                    price_per_share: order.price_per_share,
                    total_amount: total,
                    profit_loss: None,
                    avg_cost_basis: None,
                    transaction_date: date,
                };
                insert_event(conn, &transaction)?;

                Ok(BuyOutcome {
                    position,
                    transaction,
                })
            })
            .await
    }

    async fn execute_sell(&self, order: SellOrder) -> Result<SellOutcome> {
        self.writer
            .exec(move |conn| {
                use finbooks_core::errors::{Error, PositionError};

                let date = order.effective_date();

                let mut position = load_position(conn, &order.user_id, &order.symbol)?
                    .ok_or_else(|| {
                        Error::Position(PositionError::PositionNotFound(order.symbol.clone()))
                    })?;

                let outcome = position.sale(order.shares, order.price_per_share)?;
                let avg_cost_basis = position.avg_buy_price;
                position.apply_sale(&outcome);

                if outcome.closes_position {
                    diesel::delete(stock_positions::table.find(&position.id))
                        .execute(conn)
                        .into_core()?;
                } else {
                    diesel::update(stock_positions::table.find(&position.id))
                        .set(StockPositionDB::from(&position))
                        .execute(conn)
                        .into_core()?;
                }

                let mut account = load_or_create_account(conn, &order.user_id)?;
                account.apply_deposit(outcome.proceeds);
                save_account(conn, &account)?;

                let transaction = StockTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: order.user_id.clone(),
                    symbol: order.symbol.clone(),
                    company_name: position.company_name.clone(),
                    transaction_type: StockTransactionType::Sell,
                    shares: order.shares,
                    price_per_share: order.price_per_share,
                    total_amount: outcome.proceeds,
                    profit_loss: Some(outcome.profit_loss),
                    avg_cost_basis: Some(avg_cost_basis),
                    transaction_date: date,
                };
                insert_event(conn, &transaction)?;

                Ok(SellOutcome {
                    position: if outcome.closes_position {
                        None
                    } else {
                        Some(position)
                    },
                    transaction,
                    profit_loss: outcome.profit_loss,
                })
            })
            .await
    }

    async fn record_dividend(&self, dividend: DividendRecord) -> Result<StockTransaction> {
        self.writer
            .exec(move |conn| {
                let date = dividend.effective_date();

                // The dividend row carries the amount as shares at a unit
                // price so the gross value reads back as the amount itself.
                let company_name = load_position(conn, &dividend.user_id, &dividend.symbol)?
                    .map(|p| p.company_name)
                    .unwrap_or_else(|| dividend.symbol.clone());

                let transaction = StockTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: dividend.user_id.clone(),
                    symbol: dividend.symbol.clone(),
                    company_name,
                    transaction_type: StockTransactionType::Dividend,
                    shares: dividend.amount,
                    price_per_share: rust_decimal::Decimal::ONE,
                    total_amount: dividend.amount,
                    profit_loss: None,
                    avg_cost_basis: None,
                    transaction_date: date,
                };
                insert_event(conn, &transaction)?;

                Ok(transaction)
            })
            .await
    }

    fn get_positions(&self, user_id: &str) -> Result<Vec<StockPosition>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = stock_positions::table
            .filter(stock_positions::user_id.eq(user_id))
            .order(stock_positions::symbol.asc())
            .load::<StockPositionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(StockPosition::from).collect())
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<StockTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        stock_transactions::table
            .filter(stock_transactions::user_id.eq(user_id))
            .order(stock_transactions::transaction_date.desc())
            .load::<StockTransactionDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(StockTransaction::try_from)
            .collect()
    }
}
