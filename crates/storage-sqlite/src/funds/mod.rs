pub mod model;
pub mod repository;

pub use model::{FundValueHistoryDB, MutualFundPositionDB, MutualFundTransactionDB};
pub use repository::FundRepository;
