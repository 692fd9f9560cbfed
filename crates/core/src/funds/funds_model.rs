//! Mutual fund domain models and position math.
//!
//! Fund positions track invested capital separately from mark-to-market
//! value. Withdrawals allocate cost proportionally to the fraction of value
//! withdrawn; revaluations move the value and leave invested capital alone.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::AMOUNT_EPSILON;
use crate::errors::{PositionError, ValidationError};
use crate::{Error, Result};

/// Category used for the mirror cash-transaction row written on invest.
pub const FUND_INVESTMENT_CATEGORY: &str = "Mutual Fund Investment";
/// Category used for the mirror cash-transaction row written on withdraw.
pub const FUND_WITHDRAWAL_CATEGORY: &str = "Mutual Fund Withdrawal";

/// Kind of a mutual fund transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundTransactionType {
    Invest,
    Withdraw,
}

impl FundTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundTransactionType::Invest => "invest",
            FundTransactionType::Withdraw => "withdraw",
        }
    }
}

impl std::str::FromStr for FundTransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "invest" => Ok(FundTransactionType::Invest),
            "withdraw" => Ok(FundTransactionType::Withdraw),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown fund transaction type: {other}"
            )))),
        }
    }
}

impl std::fmt::Display for FundTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A per-fund holding.
///
/// Invariant: `profit_loss == current_value - total_invested`. The position
/// is deleted when a withdrawal drains the value to zero or leaves invested
/// capital at or below the tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualFundPosition {
    pub id: String,
    pub user_id: String,
    pub fund_name: String,
    pub fund_type: Option<String>,
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub units: Option<Decimal>,
    pub nav: Option<Decimal>,
    pub profit_loss: Decimal,
}

impl MutualFundPosition {
    /// Folds fresh capital into the position. New money tracks 1:1 to value
    /// until the next revaluation.
    pub fn apply_invest(&mut self, amount: Decimal, units: Option<Decimal>, nav: Option<Decimal>) {
        self.total_invested += amount;
        self.current_value += amount;
        if let Some(u) = units {
            self.units = Some(self.units.unwrap_or(Decimal::ZERO) + u);
        }
        if nav.is_some() {
            self.nav = nav;
        }
        self.profit_loss = self.current_value - self.total_invested;
    }

    /// Computes the outcome of withdrawing `amount` with proportional cost
    /// allocation. The position itself is untouched; apply the outcome with
    /// [`MutualFundPosition::apply_withdrawal`].
    pub fn withdrawal(&self, amount: Decimal) -> Result<WithdrawalOutcome> {
        if amount > self.current_value {
            return Err(Error::Position(PositionError::InsufficientValue {
                attempted: amount,
                available: self.current_value,
            }));
        }
        let proportion = if self.current_value.is_zero() {
            Decimal::ZERO
        } else {
            amount / self.current_value
        };
        let invested_portion = self.total_invested * proportion;
        let remaining_value = self.current_value - amount;
        let remaining_invested = self.total_invested - invested_portion;
        Ok(WithdrawalOutcome {
            invested_portion,
            profit_loss: amount - invested_portion,
            remaining_value,
            remaining_invested,
            closes_position: remaining_value.is_zero() || remaining_invested <= AMOUNT_EPSILON,
        })
    }

    /// Shrinks the position per a computed withdrawal outcome.
    pub fn apply_withdrawal(&mut self, outcome: &WithdrawalOutcome, units: Option<Decimal>) {
        self.current_value = outcome.remaining_value;
        self.total_invested = outcome.remaining_invested;
        if let Some(u) = units {
            self.units = Some(self.units.unwrap_or(Decimal::ZERO) - u);
        }
        self.profit_loss = self.current_value - self.total_invested;
    }

    /// Computes the mark-to-market delta for revaluing to `new_value`.
    pub fn revaluation(&self, new_value: Decimal) -> RevaluationOutcome {
        let value_change = new_value - self.current_value;
        let value_change_percentage = if self.current_value.is_zero() {
            Decimal::ZERO
        } else {
            value_change / self.current_value * dec!(100)
        };
        RevaluationOutcome {
            previous_value: self.current_value,
            new_value,
            value_change,
            value_change_percentage,
            profit_loss: new_value - self.total_invested,
        }
    }

    /// Moves the position to the revalued mark. Invested capital is
    /// untouched; this models an external statement, not a cash event.
    pub fn apply_revaluation(&mut self, outcome: &RevaluationOutcome, nav: Option<Decimal>) {
        self.current_value = outcome.new_value;
        self.profit_loss = outcome.profit_loss;
        if nav.is_some() {
            self.nav = nav;
        }
    }
}

/// Result of the proportional withdrawal computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalOutcome {
    pub invested_portion: Decimal,
    pub profit_loss: Decimal,
    pub remaining_value: Decimal,
    pub remaining_invested: Decimal,
    pub closes_position: bool,
}

/// Result of the mark-to-market computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevaluationOutcome {
    pub previous_value: Decimal,
    pub new_value: Decimal,
    pub value_change: Decimal,
    pub value_change_percentage: Decimal,
    pub profit_loss: Decimal,
}

/// An append-only fund flow event. `profit_loss` is present only for
/// withdrawals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualFundTransaction {
    pub id: String,
    pub user_id: String,
    pub fund_name: String,
    pub transaction_type: FundTransactionType,
    pub amount: Decimal,
    pub units: Option<Decimal>,
    pub nav: Option<Decimal>,
    pub profit_loss: Option<Decimal>,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
}

/// An immutable revaluation trail row, written before the position update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundValueHistory {
    pub id: String,
    pub user_id: String,
    pub fund_name: String,
    pub previous_value: Decimal,
    pub new_value: Decimal,
    pub value_change: Decimal,
    pub value_change_percentage: Decimal,
    pub total_invested: Decimal,
    pub profit_loss: Decimal,
    pub update_date: NaiveDate,
    pub notes: Option<String>,
}

/// Input model for investing in a fund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestOrder {
    pub user_id: String,
    pub fund_name: String,
    pub amount: Decimal,
    pub fund_type: Option<String>,
    pub units: Option<Decimal>,
    pub nav: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl InvestOrder {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.fund_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fundName".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Investment amount must be positive".to_string(),
            )));
        }
        Ok(())
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Input model for withdrawing from a fund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawOrder {
    pub user_id: String,
    pub fund_id: String,
    pub amount: Decimal,
    pub units: Option<Decimal>,
    pub nav: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl WithdrawOrder {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.fund_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fundId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Withdrawal amount must be positive".to_string(),
            )));
        }
        Ok(())
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Input model for a mark-to-market revaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalueRequest {
    pub user_id: String,
    pub fund_id: String,
    pub new_value: Decimal,
    pub nav: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl RevalueRequest {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.fund_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fundId".to_string(),
            )));
        }
        if self.new_value < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Revalued amount cannot be negative".to_string(),
            )));
        }
        Ok(())
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// What a completed investment returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestOutcome {
    pub position: MutualFundPosition,
    pub transaction: MutualFundTransaction,
}

/// What a completed withdrawal returns. `position` is `None` when the
/// withdrawal closed the position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundWithdrawOutcome {
    pub position: Option<MutualFundPosition>,
    pub transaction: MutualFundTransaction,
    pub profit_loss: Decimal,
}

/// What a completed revaluation returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalueOutcome {
    pub position: MutualFundPosition,
    pub history_entry: FundValueHistory,
    pub value_change: Decimal,
    pub value_change_percentage: Decimal,
    pub profit_loss: Decimal,
}
