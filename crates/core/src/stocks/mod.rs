//! Stocks module - weighted-average-cost positions and trade events.

mod stocks_model;
mod stocks_service;
mod stocks_traits;


// Re-export the public interface
pub use stocks_model::{
    build_position_views, BuyOrder, BuyOutcome, DividendRecord, SaleOutcome, SellOrder,
    SellOutcome, StockPosition,
    StockPositionView, StockTransaction, StockTransactionType,
};
pub use stocks_service::StockService;
pub use stocks_traits::{StockRepositoryTrait, StockServiceTrait};
