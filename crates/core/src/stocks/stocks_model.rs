//! Stock domain models and position math.
//!
//! Positions carry a weighted-average cost basis: every buy recomputes one
//! average price over all held shares, and sells realize P&L against that
//! average rather than FIFO/LIFO lots.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{PositionError, ValidationError};
use crate::{Error, Result};

/// Kind of a stock transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTransactionType {
    Buy,
    Sell,
    /// Dividend income rows feed the income statement only; they never touch
    /// the position or the cash account.
    Dividend,
}

impl StockTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockTransactionType::Buy => "buy",
            StockTransactionType::Sell => "sell",
            StockTransactionType::Dividend => "dividend",
        }
    }
}

impl std::str::FromStr for StockTransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(StockTransactionType::Buy),
            "sell" => Ok(StockTransactionType::Sell),
            "dividend" => Ok(StockTransactionType::Dividend),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown stock transaction type: {other}"
            )))),
        }
    }
}

impl std::fmt::Display for StockTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A per-symbol holding.
///
/// Invariant: `total_invested == avg_buy_price * total_shares` within the
/// documented tolerance after every buy. A zero-share row is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPosition {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub company_name: String,
    pub total_shares: Decimal,
    pub avg_buy_price: Decimal,
    pub total_invested: Decimal,
}

impl StockPosition {
    /// Folds a purchase into the position, recomputing the weighted average.
    pub fn apply_buy(&mut self, shares: Decimal, price_per_share: Decimal) {
        let new_shares = self.total_shares + shares;
        let new_invested = self.total_invested + shares * price_per_share;
        self.avg_buy_price = new_invested / new_shares;
        self.total_shares = new_shares;
        self.total_invested = new_invested;
    }

    /// Computes the outcome of selling `shares` at `price_per_share` against
    /// the current average cost basis. The position itself is untouched;
    /// apply the outcome with [`StockPosition::apply_sale`].
    pub fn sale(&self, shares: Decimal, price_per_share: Decimal) -> Result<SaleOutcome> {
        if self.total_shares < shares {
            return Err(Error::Position(PositionError::InsufficientShares {
                symbol: self.symbol.clone(),
                attempted: shares,
                available: self.total_shares,
            }));
        }
        let cost_basis = self.avg_buy_price * shares;
        let proceeds = shares * price_per_share;
        let remaining_shares = self.total_shares - shares;
        Ok(SaleOutcome {
            cost_basis,
            proceeds,
            profit_loss: proceeds - cost_basis,
            remaining_shares,
            remaining_invested: self.total_invested - cost_basis,
            closes_position: remaining_shares.is_zero(),
        })
    }

    /// Shrinks the position per a computed sale outcome. The average buy
    /// price is left unchanged; only the share count and invested total move.
    pub fn apply_sale(&mut self, outcome: &SaleOutcome) {
        self.total_shares = outcome.remaining_shares;
        self.total_invested = outcome.remaining_invested;
    }

    /// Read-time enrichment with the latest known market price. Falls back
    /// to the average buy price when no price is supplied, which shows the
    /// holding at cost.
    pub fn market_view(&self, latest_price: Option<Decimal>) -> StockPositionView {
        let current_price = latest_price.unwrap_or(self.avg_buy_price);
        let current_value = self.total_shares * current_price;
        StockPositionView {
            position: self.clone(),
            current_price,
            current_value,
            profit_loss: current_value - self.total_invested,
        }
    }
}

/// Result of the sale computation on a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleOutcome {
    pub cost_basis: Decimal,
    pub proceeds: Decimal,
    pub profit_loss: Decimal,
    pub remaining_shares: Decimal,
    pub remaining_invested: Decimal,
    pub closes_position: bool,
}

/// An append-only stock trade event. Immutable once written;
/// `profit_loss`/`avg_cost_basis` are present only for sells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub company_name: String,
    pub transaction_type: StockTransactionType,
    pub shares: Decimal,
    pub price_per_share: Decimal,
    pub total_amount: Decimal,
    pub profit_loss: Option<Decimal>,
    pub avg_cost_basis: Option<Decimal>,
    pub transaction_date: NaiveDate,
}

/// A position enriched with the latest known market price at read time.
/// Never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPositionView {
    #[serde(flatten)]
    pub position: StockPosition,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
}

/// Input model for buying stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyOrder {
    pub user_id: String,
    pub symbol: String,
    pub company_name: String,
    pub shares: Decimal,
    pub price_per_share: Decimal,
    /// Defaults to the current date when omitted.
    pub date: Option<NaiveDate>,
}

impl BuyOrder {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.shares <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Share count must be positive".to_string(),
            )));
        }
        if self.price_per_share <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price per share must be positive".to_string(),
            )));
        }
        Ok(())
    }

    pub fn total_amount(&self) -> Decimal {
        self.shares * self.price_per_share
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Input model for selling stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellOrder {
    pub user_id: String,
    pub symbol: String,
    pub shares: Decimal,
    pub price_per_share: Decimal,
    pub date: Option<NaiveDate>,
}

impl SellOrder {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.shares <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Share count must be positive".to_string(),
            )));
        }
        if self.price_per_share <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price per share must be positive".to_string(),
            )));
        }
        Ok(())
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Input model for recording dividend income on a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendRecord {
    pub user_id: String,
    pub symbol: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
}

impl DividendRecord {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Dividend amount must be positive".to_string(),
            )));
        }
        Ok(())
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// What a completed buy returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyOutcome {
    pub position: StockPosition,
    pub transaction: StockTransaction,
}

/// What a completed sell returns to the caller. `position` is `None` when the
/// sale closed the position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellOutcome {
    pub position: Option<StockPosition>,
    pub transaction: StockTransaction,
    pub profit_loss: Decimal,
}

/// Builds read-time views for a set of positions from a symbol→price map.
pub fn build_position_views(
    positions: &[StockPosition],
    prices: &HashMap<String, Decimal>,
) -> Vec<StockPositionView> {
    positions
        .iter()
        .map(|p| p.market_view(prices.get(&p.symbol).copied()))
        .collect()
}
