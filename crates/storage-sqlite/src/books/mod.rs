pub mod repository;

pub use repository::BooksRepository;
