//! Decimal formatting utilities for human-readable display.
//!
//! Fixed-precision rendering with thousands separators, signed percentage
//! changes, allocation percentages and K/M/B/T abbreviation for market caps.

use super::num::group_thousands;
use rust_decimal::prelude::*;

/// Round half away from zero to `dp` places and render with exactly `dp` decimals.
pub fn fixed(value: &Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1$}", rounded, dp as usize)
}

/// US-dollar amount with two decimals and separators (`$1,234.50`).
pub fn usd(value: &Decimal) -> String {
    let body = group_thousands(&fixed(&value.abs(), 2));
    if value.is_sign_negative() && !value.is_zero() {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// 24h change with explicit sign and two decimals (`+1.23%`, `-0.40%`).
pub fn signed_percent(value: &Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        ""
    } else {
        "+"
    };
    format!("{}{}%", sign, fixed(value, 2))
}

/// Allocation share: two decimals below 0.1%, one decimal otherwise.
pub fn allocation_percent(value: &Decimal) -> String {
    let dp = if *value < Decimal::new(1, 1) { 2 } else { 1 };
    format!("{}%", fixed(value, dp))
}

/// Holdings quantity with four decimals (`0.0000`).
pub fn quantity(value: &Decimal) -> String {
    fixed(value, 4)
}

/// Abbreviate a `Decimal` with K/M/B/T suffixes.
pub fn abbr_number(amount: &Decimal, digits: usize) -> String {
    const UNITS: [(i64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();

    for (unit, suffix) in UNITS {
        let unit = Decimal::from(unit);
        if abs_amount >= unit {
            let scaled = (abs_amount / unit).round_dp_with_strategy(
                digits as u32,
                RoundingStrategy::MidpointAwayFromZero,
            );
            return format!("{}{:.precision$}{}", sign, scaled, suffix, precision = digits);
        }
    }

    format!("{}{}", sign, fixed(&abs_amount, digits as u32))
}
