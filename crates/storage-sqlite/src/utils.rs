//! Conversion helpers between domain `Decimal` values and the `Double`
//! columns SQLite stores them in.
//!
//! Reads round to six decimal places so float noise cannot leak into the
//! domain's boundary comparisons (insufficient-shares checks, the close-out
//! tolerance on fund positions).

use finbooks_core::constants::DECIMAL_PRECISION;
use num_traits::FromPrimitive;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

pub fn f64_to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(DECIMAL_PRECISION)
}

pub fn opt_decimal_to_f64(value: Option<Decimal>) -> Option<f64> {
    value.map(decimal_to_f64)
}

pub fn opt_f64_to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.map(f64_to_decimal)
}
