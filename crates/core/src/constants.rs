use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance for equality checks on currency amounts.
pub const AMOUNT_EPSILON: Decimal = dec!(0.01);

/// Decimal precision for internal calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
