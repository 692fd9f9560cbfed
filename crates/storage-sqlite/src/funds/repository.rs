//! SQLite-backed implementation of the mutual fund repository.
//!
//! Fund flows never touch the cash account balance; invest and withdraw
//! append a mirror cash-transaction row instead so the books still see the
//! cash leg. Revaluations write the history row before moving the position.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use finbooks_core::cash::{CashTransaction, CashTransactionType};
use finbooks_core::errors::{Error, PositionError, Result};
use finbooks_core::funds::{
    FundRepositoryTrait, FundTransactionType, FundValueHistory, FundWithdrawOutcome, InvestOrder,
    InvestOutcome, MutualFundPosition, MutualFundTransaction, RevalueOutcome, RevalueRequest,
    WithdrawOrder, FUND_INVESTMENT_CATEGORY, FUND_WITHDRAWAL_CATEGORY,
};

use super::model::{FundValueHistoryDB, MutualFundPositionDB, MutualFundTransactionDB};
use crate::cash::repository::insert_transaction;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{mutual_fund_positions, mutual_fund_transactions, mutual_fund_value_history};

pub struct FundRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FundRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_position_by_name(
    conn: &mut SqliteConnection,
    user_id: &str,
    fund_name: &str,
) -> Result<Option<MutualFundPosition>> {
    let row = mutual_fund_positions::table
        .filter(mutual_fund_positions::user_id.eq(user_id))
        .filter(mutual_fund_positions::fund_name.eq(fund_name))
        .first::<MutualFundPositionDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(MutualFundPosition::from))
}

fn load_position_by_id(
    conn: &mut SqliteConnection,
    user_id: &str,
    fund_id: &str,
) -> Result<MutualFundPosition> {
    let row = mutual_fund_positions::table
        .find(fund_id)
        .filter(mutual_fund_positions::user_id.eq(user_id))
        .first::<MutualFundPositionDB>(conn)
        .optional()
        .into_core()?;
    row.map(MutualFundPosition::from)
        .ok_or_else(|| Error::Position(PositionError::FundNotFound(fund_id.to_string())))
}

fn insert_event(conn: &mut SqliteConnection, transaction: &MutualFundTransaction) -> Result<()> {
    diesel::insert_into(mutual_fund_transactions::table)
        .values(MutualFundTransactionDB::from(transaction))
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl FundRepositoryTrait for FundRepository {
    async fn execute_invest(&self, order: InvestOrder) -> Result<InvestOutcome> {
        self.writer
            .exec(move |conn| {
                let date = order.effective_date();

                let position = match load_position_by_name(conn, &order.user_id, &order.fund_name)?
                {
                    Some(mut position) => {
                        position.apply_invest(order.amount, order.units, order.nav);
                        if order.fund_type.is_some() {
                            position.fund_type = order.fund_type.clone();
                        }
                        diesel::update(mutual_fund_positions::table.find(&position.id))
                            .set(MutualFundPositionDB::from(&position))
                            .execute(conn)
                            .into_core()?;
                        position
                    }
                    None => {
                        let position = MutualFundPosition {
                            id: Uuid::new_v4().to_string(),
                            user_id: order.user_id.clone(),
                            fund_name: order.fund_name.clone(),
                            fund_type: order.fund_type.clone(),
                            total_invested: order.amount,
                            current_value: order.amount,
                            units: order.units,
                            nav: order.nav,
                            profit_loss: rust_decimal::Decimal::ZERO,
                        };
                        diesel::insert_into(mutual_fund_positions::table)
                            .values(MutualFundPositionDB::from(&position))
                            .execute(conn)
                            .into_core()?;
                        position
                    }
                };

                let transaction = MutualFundTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: order.user_id.clone(),
                    fund_name: order.fund_name.clone(),
                    transaction_type: FundTransactionType::Invest,
                    amount: order.amount,
                    units: order.units,
                    nav: order.nav,
                    profit_loss: None,
                    transaction_date: date,
                    description: order.description.clone(),
                };
                insert_event(conn, &transaction)?;

                let mirror = CashTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: order.user_id.clone(),
                    transaction_type: CashTransactionType::Expense,
                    amount: order.amount,
                    category: FUND_INVESTMENT_CATEGORY.to_string(),
                    description: Some(format!("Investment in {}", order.fund_name)),
                    date,
                };
                insert_transaction(conn, &mirror)?;

                Ok(InvestOutcome {
                    position,
                    transaction,
                })
            })
            .await
    }

    async fn execute_withdraw(&self, order: WithdrawOrder) -> Result<FundWithdrawOutcome> {
        self.writer
            .exec(move |conn| {
                let date = order.effective_date();

                let mut position = load_position_by_id(conn, &order.user_id, &order.fund_id)?;
                let outcome = position.withdrawal(order.amount)?;
                position.apply_withdrawal(&outcome, order.units);

                if outcome.closes_position {
                    diesel::delete(mutual_fund_positions::table.find(&position.id))
                        .execute(conn)
                        .into_core()?;
                } else {
                    diesel::update(mutual_fund_positions::table.find(&position.id))
                        .set(MutualFundPositionDB::from(&position))
                        .execute(conn)
                        .into_core()?;
                }

                let transaction = MutualFundTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: order.user_id.clone(),
                    fund_name: position.fund_name.clone(),
                    transaction_type: FundTransactionType::Withdraw,
                    amount: order.amount,
                    units: order.units,
                    nav: order.nav,
                    profit_loss: Some(outcome.profit_loss),
                    transaction_date: date,
                    description: order.description.clone(),
                };
                insert_event(conn, &transaction)?;

                let mirror = CashTransaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: order.user_id.clone(),
                    transaction_type: CashTransactionType::Income,
                    amount: order.amount,
                    category: FUND_WITHDRAWAL_CATEGORY.to_string(),
                    description: Some(format!("Withdrawal from {}", position.fund_name)),
                    date,
                };
                insert_transaction(conn, &mirror)?;

                Ok(FundWithdrawOutcome {
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

    async fn execute_revalue(&self, request: RevalueRequest) -> Result<RevalueOutcome> {
        self.writer
            .exec(move |conn| {
                let date = request.effective_date();

                let mut position = load_position_by_id(conn, &request.user_id, &request.fund_id)?;
                let outcome = position.revaluation(request.new_value);

                let history_entry = FundValueHistory {
                    id: Uuid::new_v4().to_string(),
                    user_id: request.user_id.clone(),
                    fund_name: position.fund_name.clone(),
                    previous_value: outcome.previous_value,
                    new_value: outcome.new_value,
                    value_change: outcome.value_change,
                    value_change_percentage: outcome.value_change_percentage,
                    total_invested: position.total_invested,
                    profit_loss: outcome.profit_loss,
                    update_date: date,
                    notes: request.notes.clone(),
                };
                diesel::insert_into(mutual_fund_value_history::table)
                    .values(FundValueHistoryDB::from(&history_entry))
                    .execute(conn)
                    .into_core()?;

                position.apply_revaluation(&outcome, request.nav);
                diesel::update(mutual_fund_positions::table.find(&position.id))
                    .set(MutualFundPositionDB::from(&position))
                    .execute(conn)
                    .into_core()?;

                Ok(RevalueOutcome {
                    position,
                    history_entry,
                    value_change: outcome.value_change,
                    value_change_percentage: outcome.value_change_percentage,
                    profit_loss: outcome.profit_loss,
                })
            })
            .await
    }

    fn get_positions(&self, user_id: &str) -> Result<Vec<MutualFundPosition>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = mutual_fund_positions::table
            .filter(mutual_fund_positions::user_id.eq(user_id))
            .order(mutual_fund_positions::fund_name.asc())
            .load::<MutualFundPositionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(MutualFundPosition::from).collect())
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<MutualFundTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        mutual_fund_transactions::table
            .filter(mutual_fund_transactions::user_id.eq(user_id))
            .order(mutual_fund_transactions::transaction_date.desc())
            .load::<MutualFundTransactionDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(MutualFundTransaction::try_from)
            .collect()
    }

    fn list_value_history(
        &self,
        user_id: &str,
        fund_id: Option<&str>,
    ) -> Result<Vec<FundValueHistory>> {
        let mut conn = get_connection(&self.pool)?;

        // History rows key by fund name; a fund id narrows to that
        // position's name when the position still exists.
        let fund_name = match fund_id {
            Some(id) => {
                let row = mutual_fund_positions::table
                    .find(id)
                    .filter(mutual_fund_positions::user_id.eq(user_id))
                    .first::<MutualFundPositionDB>(&mut conn)
                    .optional()
                    .into_core()?;
                Some(
                    row.map(|p| p.fund_name)
                        .ok_or_else(|| {
                            Error::Position(PositionError::FundNotFound(id.to_string()))
                        })?,
                )
            }
            None => None,
        };

        let mut query = mutual_fund_value_history::table
            .filter(mutual_fund_value_history::user_id.eq(user_id))
            .into_boxed();
        if let Some(name) = fund_name {
            query = query.filter(mutual_fund_value_history::fund_name.eq(name));
        }

        let rows = query
            .order(mutual_fund_value_history::update_date.desc())
            .load::<FundValueHistoryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(FundValueHistory::from).collect())
    }
}
