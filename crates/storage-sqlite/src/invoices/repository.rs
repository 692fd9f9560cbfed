//! SQLite-backed implementation of the invoice repository.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use finbooks_core::errors::{DatabaseError, Error, Result};
use finbooks_core::invoices::{Invoice, InvoiceRepositoryTrait, InvoiceStatus, NewInvoice};

use super::model::InvoiceDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::invoices;

pub struct InvoiceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvoiceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl InvoiceRepositoryTrait for InvoiceRepository {
    async fn create(&self, new_invoice: NewInvoice) -> Result<Invoice> {
        self.writer
            .exec(move |conn| {
                let invoice = Invoice {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_invoice.user_id,
                    invoice_number: new_invoice.invoice_number,
                    client_name: new_invoice.client_name,
                    invoice_type: new_invoice.invoice_type,
                    status: new_invoice.status,
                    total_amount: new_invoice.total_amount,
                    invoice_date: new_invoice.invoice_date,
                    due_date: new_invoice.due_date,
                };
                diesel::insert_into(invoices::table)
                    .values(InvoiceDB::from(&invoice))
                    .execute(conn)
                    .into_core()?;
                Ok(invoice)
            })
            .await
    }

    async fn update_status(&self, invoice_id: &str, status: InvoiceStatus) -> Result<Invoice> {
        let invoice_id = invoice_id.to_string();
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(invoices::table.find(&invoice_id))
                    .set(invoices::status.eq(status.as_str()))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Invoice not found: {invoice_id}"
                    ))));
                }
                invoices::table
                    .find(&invoice_id)
                    .first::<InvoiceDB>(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }

    async fn delete(&self, invoice_id: &str) -> Result<usize> {
        let invoice_id = invoice_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(invoices::table.find(&invoice_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, invoice_id: &str) -> Result<Invoice> {
        let mut conn = get_connection(&self.pool)?;
        invoices::table
            .find(invoice_id)
            .first::<InvoiceDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    fn list(&self, user_id: &str) -> Result<Vec<Invoice>> {
        let mut conn = get_connection(&self.pool)?;
        invoices::table
            .filter(invoices::user_id.eq(user_id))
            .order(invoices::invoice_date.desc())
            .load::<InvoiceDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Invoice::try_from)
            .collect()
    }
}
