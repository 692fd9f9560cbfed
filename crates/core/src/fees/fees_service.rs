use log::debug;
use std::sync::Arc;

use super::fees_model::{FeeSummary, NewTradingFee, TradingFee};
use super::fees_traits::{FeeRepositoryTrait, FeeServiceTrait};
use crate::errors::Result;

/// Service for trading fees.
pub struct FeeService {
    repository: Arc<dyn FeeRepositoryTrait>,
}

impl FeeService {
    pub fn new(repository: Arc<dyn FeeRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl FeeServiceTrait for FeeService {
    async fn add_fee(&self, new_fee: NewTradingFee) -> Result<TradingFee> {
        debug!(
            "Recording {} fee of {} for user {}",
            new_fee.fee_type, new_fee.amount, new_fee.user_id
        );
        new_fee.validate()?;
        self.repository.create(new_fee).await
    }

    async fn delete_fee(&self, fee_id: &str) -> Result<()> {
        self.repository.delete(fee_id).await?;
        Ok(())
    }

    fn list_fees(&self, user_id: &str) -> Result<Vec<TradingFee>> {
        self.repository.list(user_id)
    }

    fn get_fee_summary(&self, user_id: &str) -> Result<FeeSummary> {
        let fees = self.repository.list(user_id)?;
        Ok(FeeSummary::summarize(&fees))
    }
}
