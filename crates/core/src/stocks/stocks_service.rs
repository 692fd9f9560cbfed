use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::stocks_model::{
    build_position_views, BuyOrder, BuyOutcome, DividendRecord, SellOrder, SellOutcome,
    StockPosition, StockPositionView, StockTransaction,
};
use super::stocks_traits::{StockRepositoryTrait, StockServiceTrait};
use crate::errors::Result;

/// Service for stock positions and trades.
pub struct StockService {
    repository: Arc<dyn StockRepositoryTrait>,
}

impl StockService {
    pub fn new(repository: Arc<dyn StockRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl StockServiceTrait for StockService {
    async fn buy_stock(&self, order: BuyOrder) -> Result<BuyOutcome> {
        debug!(
            "Buying {} x {} @ {} for user {}",
            order.shares, order.symbol, order.price_per_share, order.user_id
        );
        order.validate()?;
        self.repository.execute_buy(order).await
    }

    async fn sell_stock(&self, order: SellOrder) -> Result<SellOutcome> {
        debug!(
            "Selling {} x {} @ {} for user {}",
            order.shares, order.symbol, order.price_per_share, order.user_id
        );
        order.validate()?;
        self.repository.execute_sell(order).await
    }

    async fn record_dividend(&self, dividend: DividendRecord) -> Result<StockTransaction> {
        debug!(
            "Recording dividend of {} on {} for user {}",
            dividend.amount, dividend.symbol, dividend.user_id
        );
        dividend.validate()?;
        self.repository.record_dividend(dividend).await
    }

    fn get_positions(&self, user_id: &str) -> Result<Vec<StockPosition>> {
        self.repository.get_positions(user_id)
    }

    fn get_position_views(
        &self,
        user_id: &str,
        prices: &HashMap<String, Decimal>,
    ) -> Result<Vec<StockPositionView>> {
        let positions = self.repository.get_positions(user_id)?;
        Ok(build_position_views(&positions, prices))
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<StockTransaction>> {
        self.repository.list_transactions(user_id)
    }
}
