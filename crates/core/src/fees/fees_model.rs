//! Trading fee domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Bucket a trading fee falls into. CGT gets its own income-statement line;
/// everything else counts as broker fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    BrokerCharge,
    Cgt,
    Other,
}

impl FeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::BrokerCharge => "broker_charge",
            FeeType::Cgt => "cgt",
            FeeType::Other => "other",
        }
    }
}

impl std::str::FromStr for FeeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "broker_charge" => Ok(FeeType::BrokerCharge),
            "cgt" => Ok(FeeType::Cgt),
            "other" => Ok(FeeType::Other),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown fee type: {other}"
            )))),
        }
    }
}

impl std::fmt::Display for FeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted trading fee row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingFee {
    pub id: String,
    pub user_id: String,
    pub fee_type: FeeType,
    pub amount: Decimal,
    pub fee_date: NaiveDate,
    pub description: Option<String>,
}

/// Input model for recording a trading fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTradingFee {
    pub user_id: String,
    pub fee_type: FeeType,
    pub amount: Decimal,
    pub fee_date: NaiveDate,
    pub description: Option<String>,
}

impl NewTradingFee {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Fee amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Per-type fee totals plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub broker_charges: Decimal,
    pub cgt: Decimal,
    pub other_fees: Decimal,
    pub total_fees: Decimal,
}

impl FeeSummary {
    pub fn summarize(fees: &[TradingFee]) -> Self {
        let mut summary = FeeSummary::default();
        for fee in fees {
            match fee.fee_type {
                FeeType::BrokerCharge => summary.broker_charges += fee.amount,
                FeeType::Cgt => summary.cgt += fee.amount,
                FeeType::Other => summary.other_fees += fee.amount,
            }
            summary.total_fees += fee.amount;
        }
        summary
    }
}
