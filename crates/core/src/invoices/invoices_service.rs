use log::debug;
use std::sync::Arc;

use super::invoices_model::{Invoice, InvoiceStatus, NewInvoice};
use super::invoices_traits::{InvoiceRepositoryTrait, InvoiceServiceTrait};
use crate::errors::Result;

/// Service for invoice rows.
pub struct InvoiceService {
    repository: Arc<dyn InvoiceRepositoryTrait>,
}

impl InvoiceService {
    pub fn new(repository: Arc<dyn InvoiceRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl InvoiceServiceTrait for InvoiceService {
    async fn create_invoice(&self, new_invoice: NewInvoice) -> Result<Invoice> {
        debug!(
            "Creating {} invoice {} for user {}",
            new_invoice.invoice_type.as_str(),
            new_invoice.invoice_number,
            new_invoice.user_id
        );
        new_invoice.validate()?;
        self.repository.create(new_invoice).await
    }

    async fn update_status(&self, invoice_id: &str, status: InvoiceStatus) -> Result<Invoice> {
        debug!("Moving invoice {} to status {}", invoice_id, status);
        self.repository.update_status(invoice_id, status).await
    }

    async fn delete_invoice(&self, invoice_id: &str) -> Result<()> {
        self.repository.delete(invoice_id).await?;
        Ok(())
    }

    fn get_invoice(&self, invoice_id: &str) -> Result<Invoice> {
        self.repository.get_by_id(invoice_id)
    }

    fn list_invoices(&self, user_id: &str) -> Result<Vec<Invoice>> {
        self.repository.list(user_id)
    }
}
