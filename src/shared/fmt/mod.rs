//! Display formatting for prices, values and percentages.
//!
//! `num` handles digit grouping on already-rendered strings; `decimal`
//! renders `rust_decimal::Decimal` values with fixed precision.

pub mod decimal;
pub mod num;
