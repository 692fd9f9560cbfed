pub mod model;
pub mod repository;

pub use model::TradingFeeDB;
pub use repository::FeeRepository;
