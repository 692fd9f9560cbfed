//! Source fetch for report derivation.
//!
//! All five sources are read inside one transaction on one connection, so a
//! mutation committing mid-fetch cannot leave a report with a partial view.

use std::sync::Arc;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use finbooks_core::books::{BookSources, BooksRepositoryTrait, SourceWindow};
use finbooks_core::cash::CashTransaction;
use finbooks_core::errors::Result;
use finbooks_core::fees::TradingFee;
use finbooks_core::funds::MutualFundTransaction;
use finbooks_core::invoices::Invoice;
use finbooks_core::stocks::StockTransaction;

use crate::cash::model::CashTransactionDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::fees::model::TradingFeeDB;
use crate::funds::model::MutualFundTransactionDB;
use crate::invoices::model::InvoiceDB;
use crate::schema::{
    cash_transactions, invoices, mutual_fund_transactions, stock_transactions, trading_fees,
};
use crate::stocks::model::StockTransactionDB;

pub struct BooksRepository {
    pool: Arc<DbPool>,
}

impl BooksRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

fn fetch_all(
    conn: &mut SqliteConnection,
    user_id: &str,
    window: &SourceWindow,
) -> Result<BookSources> {
    let mut cash_query = cash_transactions::table
        .filter(cash_transactions::user_id.eq(user_id))
        .filter(cash_transactions::date.le(window.end))
        .into_boxed();
    if let Some(start) = window.start {
        cash_query = cash_query.filter(cash_transactions::date.ge(start));
    }
    let cash_rows = cash_query
        .order(cash_transactions::date.asc())
        .load::<CashTransactionDB>(conn)
        .map_err(StorageError::from)?;

    let mut invoice_query = invoices::table
        .filter(invoices::user_id.eq(user_id))
        .filter(invoices::invoice_date.le(window.end))
        .into_boxed();
    if let Some(start) = window.start {
        invoice_query = invoice_query.filter(invoices::invoice_date.ge(start));
    }
    let invoice_rows = invoice_query
        .order(invoices::invoice_date.asc())
        .load::<InvoiceDB>(conn)
        .map_err(StorageError::from)?;

    let mut stock_query = stock_transactions::table
        .filter(stock_transactions::user_id.eq(user_id))
        .filter(stock_transactions::transaction_date.le(window.end))
        .into_boxed();
    if let Some(start) = window.start {
        stock_query = stock_query.filter(stock_transactions::transaction_date.ge(start));
    }
    let stock_rows = stock_query
        .order(stock_transactions::transaction_date.asc())
        .load::<StockTransactionDB>(conn)
        .map_err(StorageError::from)?;

    let mut fund_query = mutual_fund_transactions::table
        .filter(mutual_fund_transactions::user_id.eq(user_id))
        .filter(mutual_fund_transactions::transaction_date.le(window.end))
        .into_boxed();
    if let Some(start) = window.start {
        fund_query = fund_query.filter(mutual_fund_transactions::transaction_date.ge(start));
    }
    let fund_rows = fund_query
        .order(mutual_fund_transactions::transaction_date.asc())
        .load::<MutualFundTransactionDB>(conn)
        .map_err(StorageError::from)?;

    let mut fee_query = trading_fees::table
        .filter(trading_fees::user_id.eq(user_id))
        .filter(trading_fees::fee_date.le(window.end))
        .into_boxed();
    if let Some(start) = window.start {
        fee_query = fee_query.filter(trading_fees::fee_date.ge(start));
    }
    let fee_rows = fee_query
        .order(trading_fees::fee_date.asc())
        .load::<TradingFeeDB>(conn)
        .map_err(StorageError::from)?;

    Ok(BookSources {
        cash_transactions: cash_rows
            .into_iter()
            .map(CashTransaction::try_from)
            .collect::<Result<_>>()?,
        invoices: invoice_rows
            .into_iter()
            .map(Invoice::try_from)
            .collect::<Result<_>>()?,
        stock_transactions: stock_rows
            .into_iter()
            .map(StockTransaction::try_from)
            .collect::<Result<_>>()?,
        fund_transactions: fund_rows
            .into_iter()
            .map(MutualFundTransaction::try_from)
            .collect::<Result<_>>()?,
        trading_fees: fee_rows
            .into_iter()
            .map(TradingFee::try_from)
            .collect::<Result<_>>()?,
    })
}

impl BooksRepositoryTrait for BooksRepository {
    fn fetch_sources(&self, user_id: &str, window: &SourceWindow) -> Result<BookSources> {
        let mut conn = get_connection(&self.pool)?;
        conn.transaction::<_, StorageError, _>(|c| {
            fetch_all(c, user_id, window).map_err(StorageError::from)
        })
        .map_err(|e: StorageError| e.into())
    }
}
