//! Trading fee repository and service traits.

use async_trait::async_trait;

use super::fees_model::{FeeSummary, NewTradingFee, TradingFee};
use crate::errors::Result;

/// Trait defining the contract for trading fee persistence.
#[async_trait]
pub trait FeeRepositoryTrait: Send + Sync {
    /// Records a new fee row.
    async fn create(&self, new_fee: NewTradingFee) -> Result<TradingFee>;

    /// Deletes a fee by its ID. Returns the number of deleted records.
    async fn delete(&self, fee_id: &str) -> Result<usize>;

    /// Lists all fee rows for the user, newest first.
    fn list(&self, user_id: &str) -> Result<Vec<TradingFee>>;
}

/// Trait defining the contract for trading fee service operations.
#[async_trait]
pub trait FeeServiceTrait: Send + Sync {
    /// Records a fee after input validation.
    async fn add_fee(&self, new_fee: NewTradingFee) -> Result<TradingFee>;

    /// Deletes a fee.
    async fn delete_fee(&self, fee_id: &str) -> Result<()>;

    /// Lists all fee rows for the user.
    fn list_fees(&self, user_id: &str) -> Result<Vec<TradingFee>>;

    /// Totals the user's fees per type.
    fn get_fee_summary(&self, user_id: &str) -> Result<FeeSummary>;
}
