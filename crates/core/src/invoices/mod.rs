//! Invoices module - raw invoice rows as a report source.

mod invoices_model;
mod invoices_service;
mod invoices_traits;


// Re-export the public interface
pub use invoices_model::{Invoice, InvoiceStatus, InvoiceType, NewInvoice};
pub use invoices_service::InvoiceService;
pub use invoices_traits::{InvoiceRepositoryTrait, InvoiceServiceTrait};
