//! Invoice domain models.
//!
//! Invoices are raw report sources here: no line items, rendering, or
//! delivery. The status drives how the report folds treat each row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Whether the invoice bills a client (income) or records a payable
/// (expense).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    Income,
    Expense,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Income => "income",
            InvoiceType::Expense => "expense",
        }
    }
}

impl std::str::FromStr for InvoiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(InvoiceType::Income),
            "expense" => Ok(InvoiceType::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown invoice type: {other}"
            )))),
        }
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Sent and overdue invoices sit on the receivable/payable side of the
    /// balance sheet.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown invoice status: {other}"
            )))),
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted invoice row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub user_id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub total_amount: Decimal,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Input model for creating an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub user_id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub total_amount: Decimal,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl NewInvoice {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.invoice_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "invoiceNumber".to_string(),
            )));
        }
        if self.client_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "clientName".to_string(),
            )));
        }
        if self.total_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Invoice amount must be positive".to_string(),
            )));
        }
        if self.due_date < self.invoice_date {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Due date cannot precede the invoice date".to_string(),
            )));
        }
        Ok(())
    }
}
