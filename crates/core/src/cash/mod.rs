//! Cash module - cash account balance and income/expense transactions.

mod cash_model;
mod cash_service;
mod cash_traits;

#[cfg(test)]
mod cash_model_tests;
#[cfg(test)]
mod cash_service_tests;

// Re-export the public interface
pub use cash_model::{
    CashAccount, CashAdjustment, CashTransaction, CashTransactionType, NewCashTransaction,
    CASH_DEPOSIT_CATEGORY, CASH_WITHDRAWAL_CATEGORY,
};
pub use cash_service::CashService;
pub use cash_traits::{CashRepositoryTrait, CashServiceTrait};
