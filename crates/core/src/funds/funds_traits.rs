//! Mutual fund repository and service traits.

use async_trait::async_trait;

use super::funds_model::{
    FundValueHistory, FundWithdrawOutcome, InvestOrder, InvestOutcome, MutualFundPosition,
    MutualFundTransaction, RevalueOutcome, RevalueRequest, WithdrawOrder,
};
use crate::errors::Result;

/// Trait defining the contract for mutual fund persistence.
///
/// Each mutation runs its whole write sequence (position, event row, mirror
/// cash row or history row) as one atomic unit.
#[async_trait]
pub trait FundRepositoryTrait: Send + Sync {
    /// Invests: position upsert, `invest` transaction append, mirror expense
    /// cash row. The cash account balance is not touched.
    async fn execute_invest(&self, order: InvestOrder) -> Result<InvestOutcome>;

    /// Withdraws with proportional cost allocation: position shrink (or
    /// delete at the boundary), `withdraw` transaction append with realized
    /// P&L, mirror income cash row.
    async fn execute_withdraw(&self, order: WithdrawOrder) -> Result<FundWithdrawOutcome>;

    /// Revalues: immutable history row append, then position update. Never
    /// touches cash.
    async fn execute_revalue(&self, request: RevalueRequest) -> Result<RevalueOutcome>;

    /// Lists the user's open fund positions.
    fn get_positions(&self, user_id: &str) -> Result<Vec<MutualFundPosition>>;

    /// Lists all fund flow events for the user, newest first.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<MutualFundTransaction>>;

    /// Lists the revaluation trail, optionally narrowed to one fund.
    fn list_value_history(
        &self,
        user_id: &str,
        fund_id: Option<&str>,
    ) -> Result<Vec<FundValueHistory>>;
}

/// Trait defining the contract for mutual fund service operations.
#[async_trait]
pub trait FundServiceTrait: Send + Sync {
    /// Invests in a fund after input validation.
    async fn invest(&self, order: InvestOrder) -> Result<InvestOutcome>;

    /// Withdraws from a fund after input validation.
    async fn withdraw(&self, order: WithdrawOrder) -> Result<FundWithdrawOutcome>;

    /// Revalues a fund after input validation.
    async fn revalue(&self, request: RevalueRequest) -> Result<RevalueOutcome>;

    /// Lists the user's open fund positions.
    fn get_positions(&self, user_id: &str) -> Result<Vec<MutualFundPosition>>;

    /// Lists all fund flow events for the user.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<MutualFundTransaction>>;

    /// Lists the revaluation trail, optionally narrowed to one fund.
    fn list_value_history(
        &self,
        user_id: &str,
        fund_id: Option<&str>,
    ) -> Result<Vec<FundValueHistory>>;
}
