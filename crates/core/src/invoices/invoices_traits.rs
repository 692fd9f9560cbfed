//! Invoice repository and service traits.

use async_trait::async_trait;

use super::invoices_model::{Invoice, InvoiceStatus, NewInvoice};
use crate::errors::Result;

/// Trait defining the contract for invoice persistence.
#[async_trait]
pub trait InvoiceRepositoryTrait: Send + Sync {
    /// Creates a new invoice row.
    async fn create(&self, new_invoice: NewInvoice) -> Result<Invoice>;

    /// Moves an invoice to a new status.
    async fn update_status(&self, invoice_id: &str, status: InvoiceStatus) -> Result<Invoice>;

    /// Deletes an invoice by its ID. Returns the number of deleted records.
    async fn delete(&self, invoice_id: &str) -> Result<usize>;

    /// Retrieves an invoice by its ID.
    fn get_by_id(&self, invoice_id: &str) -> Result<Invoice>;

    /// Lists all invoices for the user, newest first.
    fn list(&self, user_id: &str) -> Result<Vec<Invoice>>;
}

/// Trait defining the contract for invoice service operations.
#[async_trait]
pub trait InvoiceServiceTrait: Send + Sync {
    /// Creates an invoice after input validation.
    async fn create_invoice(&self, new_invoice: NewInvoice) -> Result<Invoice>;

    /// Moves an invoice to a new status.
    async fn update_status(&self, invoice_id: &str, status: InvoiceStatus) -> Result<Invoice>;

    /// Deletes an invoice.
    async fn delete_invoice(&self, invoice_id: &str) -> Result<()>;

    /// Retrieves an invoice by ID.
    fn get_invoice(&self, invoice_id: &str) -> Result<Invoice>;

    /// Lists all invoices for the user.
    fn list_invoices(&self, user_id: &str) -> Result<Vec<Invoice>>;
}
