//! Finbooks Core - domain entities, services, and traits.
//!
//! This crate contains the position accounting and report derivation logic.
//! It is database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod books;
pub mod cash;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod funds;
pub mod invoices;
pub mod stocks;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
