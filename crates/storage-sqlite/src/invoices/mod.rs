pub mod model;
pub mod repository;

pub use model::InvoiceDB;
pub use repository::InvoiceRepository;
