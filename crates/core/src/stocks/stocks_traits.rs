//! Stock repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::stocks_model::{
    BuyOrder, BuyOutcome, DividendRecord, SellOrder, SellOutcome, StockPosition,
    StockPositionView, StockTransaction,
};
use crate::errors::Result;

/// Trait defining the contract for stock persistence.
///
/// `execute_buy` and `execute_sell` run the whole mutation sequence
/// (position upsert/delete, transaction append, cash settlement) as one
/// atomic unit. The insufficient-funds/shares checks happen inside that unit
/// so nothing is written when they fail.
#[async_trait]
pub trait StockRepositoryTrait: Send + Sync {
    /// Buys shares: cash check, weighted-average position upsert, `buy`
    /// transaction append, cash debit.
    async fn execute_buy(&self, order: BuyOrder) -> Result<BuyOutcome>;

    /// Sells shares: average-cost basis, position shrink (or delete at zero
    /// shares), `sell` transaction append with realized P&L, cash credit.
    async fn execute_sell(&self, order: SellOrder) -> Result<SellOutcome>;

    /// Appends a `dividend` transaction row. Positions and cash are
    /// untouched.
    async fn record_dividend(&self, dividend: DividendRecord) -> Result<StockTransaction>;

    /// Lists the user's open positions.
    fn get_positions(&self, user_id: &str) -> Result<Vec<StockPosition>>;

    /// Lists all trade events for the user, newest first.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<StockTransaction>>;
}

/// Trait defining the contract for stock service operations.
#[async_trait]
pub trait StockServiceTrait: Send + Sync {
    /// Buys shares after input validation.
    async fn buy_stock(&self, order: BuyOrder) -> Result<BuyOutcome>;

    /// Sells shares after input validation.
    async fn sell_stock(&self, order: SellOrder) -> Result<SellOutcome>;

    /// Records dividend income on a symbol.
    async fn record_dividend(&self, dividend: DividendRecord) -> Result<StockTransaction>;

    /// Lists the user's open positions as stored.
    fn get_positions(&self, user_id: &str) -> Result<Vec<StockPosition>>;

    /// Lists positions enriched with caller-supplied latest prices.
    fn get_position_views(
        &self,
        user_id: &str,
        prices: &HashMap<String, Decimal>,
    ) -> Result<Vec<StockPositionView>>;

    /// Lists all trade events for the user.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<StockTransaction>>;
}
