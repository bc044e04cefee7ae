//! Money calculation utilities using rust_decimal for precision
//!
//! This module provides precise decimal arithmetic for monetary calculations.
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;

#[cfg(test)]
mod tests;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert an `f64` into a `Decimal`
///
/// 非有限值 (NaN/Infinity) 在 DTO 校验层就被挡掉，这里回退为 0。
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert a `Decimal` back to `f64`, rounded to 2 places (half-up)
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// 行小计: 数量 × 单价
pub fn line_total(quantity: i64, price: f64) -> Decimal {
    Decimal::from(quantity) * to_decimal(price)
}

/// 金额相等判断 (容差 0.01)
pub fn amounts_equal(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}

/// 订单总额核对: 行小计合计与客户端提交值在容差内一致
pub fn order_total_matches(lines: &[(i64, f64)], claimed_total: f64) -> bool {
    let computed: Decimal = lines
        .iter()
        .map(|(quantity, price)| line_total(*quantity, *price))
        .sum();
    amounts_equal(computed, to_decimal(claimed_total))
}
