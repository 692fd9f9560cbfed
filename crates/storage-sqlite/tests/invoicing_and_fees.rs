//! Invoice and trading fee repository flows.

mod common;

use rust_decimal_macros::dec;

use finbooks_core::errors::{DatabaseError, Error};
use finbooks_core::fees::{FeeRepositoryTrait, FeeSummary, FeeType, NewTradingFee};
use finbooks_core::invoices::{InvoiceRepositoryTrait, InvoiceStatus, InvoiceType, NewInvoice};
use finbooks_storage_sqlite::fees::FeeRepository;
use finbooks_storage_sqlite::invoices::InvoiceRepository;

use common::{date, setup};

const USER: &str = "test-user";

fn sample_invoice(number: &str, day: u32) -> NewInvoice {
    NewInvoice {
        user_id: USER.to_string(),
        invoice_number: number.to_string(),
        client_name: "Acme".to_string(),
        invoice_type: InvoiceType::Income,
        status: InvoiceStatus::Sent,
        total_amount: dec!(1500),
        invoice_date: date(2024, 5, day),
        due_date: date(2024, 6, day),
    }
}

#[tokio::test]
async fn test_invoice_lifecycle() {
    let db = setup();
    let invoices = InvoiceRepository::new(db.pool.clone(), db.writer.clone());

    let created = invoices.create(sample_invoice("INV-100", 1)).await.unwrap();
    assert_eq!(created.status, InvoiceStatus::Sent);

    let paid = invoices
        .update_status(&created.id, InvoiceStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert_eq!(invoices.get_by_id(&created.id).unwrap().status, InvoiceStatus::Paid);

    assert_eq!(invoices.delete(&created.id).await.unwrap(), 1);
    assert!(invoices.list(USER).unwrap().is_empty());
}

#[tokio::test]
async fn test_updating_a_missing_invoice_is_not_found() {
    let db = setup();
    let invoices = InvoiceRepository::new(db.pool.clone(), db.writer.clone());

    let err = invoices
        .update_status("no-such-id", InvoiceStatus::Paid)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
}

#[tokio::test]
async fn test_invoices_list_newest_first() {
    let db = setup();
    let invoices = InvoiceRepository::new(db.pool.clone(), db.writer.clone());

    invoices.create(sample_invoice("INV-1", 1)).await.unwrap();
    invoices.create(sample_invoice("INV-2", 15)).await.unwrap();

    let listed = invoices.list(USER).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].invoice_number, "INV-2");
}

#[tokio::test]
async fn test_fee_summary_buckets_by_type() {
    let db = setup();
    let fees = FeeRepository::new(db.pool.clone(), db.writer.clone());

    for (fee_type, amount) in [
        (FeeType::BrokerCharge, dec!(10)),
        (FeeType::BrokerCharge, dec!(15)),
        (FeeType::Cgt, dec!(100)),
        (FeeType::Other, dec!(5)),
    ] {
        fees.create(NewTradingFee {
            user_id: USER.to_string(),
            fee_type,
            amount,
            fee_date: date(2024, 5, 1),
            description: None,
        })
        .await
        .unwrap();
    }

    let summary = FeeSummary::summarize(&fees.list(USER).unwrap());
    assert_eq!(summary.broker_charges, dec!(25));
    assert_eq!(summary.cgt, dec!(100));
    assert_eq!(summary.other_fees, dec!(5));
    assert_eq!(summary.total_fees, dec!(130));
}

#[tokio::test]
async fn test_deleting_a_fee_removes_it() {
    let db = setup();
    let fees = FeeRepository::new(db.pool.clone(), db.writer.clone());

    let fee = fees
        .create(NewTradingFee {
            user_id: USER.to_string(),
            fee_type: FeeType::Other,
            amount: dec!(9),
            fee_date: date(2024, 5, 2),
            description: Some("Wire charge".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(fees.delete(&fee.id).await.unwrap(), 1);
    assert!(fees.list(USER).unwrap().is_empty());
}
