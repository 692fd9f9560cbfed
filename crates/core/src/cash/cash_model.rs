//! Cash domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{PositionError, ValidationError};
use crate::{Error, Result};

/// Category used for the mirror transaction written on a cash deposit.
pub const CASH_DEPOSIT_CATEGORY: &str = "Cash Deposit";
/// Category used for the mirror transaction written on a cash withdrawal.
pub const CASH_WITHDRAWAL_CATEGORY: &str = "Cash Withdrawal";

/// Direction of a cash transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashTransactionType {
    Income,
    Expense,
}

impl CashTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashTransactionType::Income => "income",
            CashTransactionType::Expense => "expense",
        }
    }
}

impl std::str::FromStr for CashTransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(CashTransactionType::Income),
            "expense" => Ok(CashTransactionType::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown cash transaction type: {other}"
            )))),
        }
    }
}

impl std::fmt::Display for CashTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single cash account a user holds, created lazily with a zero balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashAccount {
    pub id: String,
    pub user_id: String,
    pub balance: Decimal,
}

impl CashAccount {
    /// Adds `amount` to the balance.
    pub fn apply_deposit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Subtracts `amount` from the balance.
    ///
    /// Fails when the balance does not cover the amount; the balance is left
    /// untouched in that case.
    pub fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()> {
        if self.balance < amount {
            return Err(Error::Position(PositionError::InsufficientFunds {
                attempted: amount,
                available: self.balance,
            }));
        }
        self.balance -= amount;
        Ok(())
    }
}

/// An income or expense row in the cash transactions table.
///
/// Besides user-entered bookkeeping rows, this table also carries the mirror
/// rows written by cash deposits/withdrawals and mutual fund flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTransaction {
    pub id: String,
    pub user_id: String,
    pub transaction_type: CashTransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Input model for recording a cash transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashTransaction {
    pub user_id: String,
    pub transaction_type: CashTransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewCashTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction amount must be positive".to_string(),
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for a cash deposit or withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashAdjustment {
    pub user_id: String,
    pub amount: Decimal,
    /// Defaults to the current date when omitted.
    pub date: Option<NaiveDate>,
}

impl CashAdjustment {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Adjustment amount must be positive".to_string(),
            )));
        }
        Ok(())
    }

    /// The date the adjustment takes effect, defaulting to today.
    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}
