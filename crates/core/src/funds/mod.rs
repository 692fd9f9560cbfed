//! Mutual funds module - invested capital, mark-to-market value, and the
//! revaluation history trail.

mod funds_model;
mod funds_service;
mod funds_traits;


// Re-export the public interface
pub use funds_model::{
    FundTransactionType, FundValueHistory, FundWithdrawOutcome, InvestOrder, InvestOutcome,
    MutualFundPosition, MutualFundTransaction, RevaluationOutcome, RevalueOutcome, RevalueRequest,
    WithdrawOrder, WithdrawalOutcome, FUND_INVESTMENT_CATEGORY, FUND_WITHDRAWAL_CATEGORY,
};
pub use funds_service::FundService;
pub use funds_traits::{FundRepositoryTrait, FundServiceTrait};
