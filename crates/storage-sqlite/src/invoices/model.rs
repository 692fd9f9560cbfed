//! Database model for invoices.

use chrono::NaiveDate;
use diesel::prelude::*;

use finbooks_core::errors::{Error, Result};
use finbooks_core::invoices::Invoice;

use crate::utils::{decimal_to_f64, f64_to_decimal};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::invoices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvoiceDB {
    pub id: String,
    pub user_id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub invoice_type: String,
    pub status: String,
    pub total_amount: f64,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl TryFrom<InvoiceDB> for Invoice {
    type Error = Error;

    fn try_from(db: InvoiceDB) -> Result<Self> {
        Ok(Invoice {
            id: db.id,
            user_id: db.user_id,
            invoice_number: db.invoice_number,
            client_name: db.client_name,
            invoice_type: db.invoice_type.parse()?,
            status: db.status.parse()?,
            total_amount: f64_to_decimal(db.total_amount),
            invoice_date: db.invoice_date,
            due_date: db.due_date,
        })
    }
}

impl From<&Invoice> for InvoiceDB {
    fn from(invoice: &Invoice) -> Self {
        InvoiceDB {
            id: invoice.id.clone(),
            user_id: invoice.user_id.clone(),
            invoice_number: invoice.invoice_number.clone(),
            client_name: invoice.client_name.clone(),
            invoice_type: invoice.invoice_type.as_str().to_string(),
            status: invoice.status.as_str().to_string(),
            total_amount: decimal_to_f64(invoice.total_amount),
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
        }
    }
}
