pub mod model;
pub mod repository;

pub use model::{CashAccountDB, CashTransactionDB};
pub use repository::CashRepository;
