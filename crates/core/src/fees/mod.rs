//! Trading fees module.

mod fees_model;
mod fees_service;
mod fees_traits;


// Re-export the public interface
pub use fees_model::{FeeSummary, FeeType, NewTradingFee, TradingFee};
pub use fees_service::FeeService;
pub use fees_traits::{FeeRepositoryTrait, FeeServiceTrait};
