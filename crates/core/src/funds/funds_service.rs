use log::debug;
use std::sync::Arc;

use super::funds_model::{
    FundValueHistory, FundWithdrawOutcome, InvestOrder, InvestOutcome, MutualFundPosition,
    MutualFundTransaction, RevalueOutcome, RevalueRequest, WithdrawOrder,
};
use super::funds_traits::{FundRepositoryTrait, FundServiceTrait};
use crate::errors::Result;

/// Service for mutual fund positions, flows, and revaluations.
pub struct FundService {
    repository: Arc<dyn FundRepositoryTrait>,
}

impl FundService {
    pub fn new(repository: Arc<dyn FundRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl FundServiceTrait for FundService {
    async fn invest(&self, order: InvestOrder) -> Result<InvestOutcome> {
        debug!(
            "Investing {} in '{}' for user {}",
            order.amount, order.fund_name, order.user_id
        );
        order.validate()?;
        self.repository.execute_invest(order).await
    }

    async fn withdraw(&self, order: WithdrawOrder) -> Result<FundWithdrawOutcome> {
        debug!(
            "Withdrawing {} from fund {} for user {}",
            order.amount, order.fund_id, order.user_id
        );
        order.validate()?;
        self.repository.execute_withdraw(order).await
    }

    async fn revalue(&self, request: RevalueRequest) -> Result<RevalueOutcome> {
        debug!(
            "Revaluing fund {} to {} for user {}",
            request.fund_id, request.new_value, request.user_id
        );
        request.validate()?;
        self.repository.execute_revalue(request).await
    }

    fn get_positions(&self, user_id: &str) -> Result<Vec<MutualFundPosition>> {
        self.repository.get_positions(user_id)
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<MutualFundTransaction>> {
        self.repository.list_transactions(user_id)
    }

    fn list_value_history(
        &self,
        user_id: &str,
        fund_id: Option<&str>,
    ) -> Result<Vec<FundValueHistory>> {
        self.repository.list_value_history(user_id, fund_id)
    }
}
