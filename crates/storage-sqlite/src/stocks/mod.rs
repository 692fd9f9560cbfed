pub mod model;
pub mod repository;

pub use model::{StockPositionDB, StockTransactionDB};
pub use repository::StockRepository;
