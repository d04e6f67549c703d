//! Allocation domain — total value and per-token share of the portfolio.
//!
//! Everything here is recomputed from the watchlist on each call; nothing is
//! cached, so a read straight after a holdings edit is never stale.

use crate::domain::watchlist::WatchlistEntry;
use crate::shared::fmt::decimal::allocation_percent;
use crate::shared::TokenId;
use rust_decimal::Decimal;
use serde::Serialize;

/// Chart palette. Colours cycle by position in the sorted breakdown.
pub const PALETTE: [&str; 24] = [
    "#10b981", "#a855f7", "#3b82f6", "#06b6d4", "#f97316", "#ec4899",
    "#8b5cf6", "#06b6d4", "#f59e0b", "#ef4444", "#84cc16", "#14b8a6",
    "#f43f5e", "#a855f7", "#3b82f6", "#06b6d4", "#f97316", "#ec4899",
    "#8b5cf6", "#06b6d4", "#f59e0b", "#ef4444", "#84cc16", "#14b8a6",
];

/// One slice of the allocation chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub id: TokenId,
    /// `"Bitcoin (BTC)"`.
    pub label: String,
    /// `holdings × current_price`.
    pub value: Decimal,
    /// Share of the total, 0–100.
    pub percentage: Decimal,
    /// `"0.05%"` below 0.1%, `"12.3%"` otherwise.
    pub percentage_label: String,
    pub color: &'static str,
}

/// Σ holdings × current_price over `entries`.
pub fn total_value<'a>(entries: impl IntoIterator<Item = &'a WatchlistEntry>) -> Decimal {
    entries
        .into_iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.position_value()))
}

/// Per-entry share of the total, sorted by value descending.
///
/// Ties keep watchlist order. Percentages are unrounded quotients, so they
/// sum to 100 only up to `Decimal` precision; they are all zero when the
/// total is zero. Colour is assigned by sorted index, so a token's colour can move
/// when rankings change.
pub fn breakdown(entries: &[WatchlistEntry]) -> Vec<AllocationSlice> {
    let total = total_value(entries);

    let mut valued: Vec<(&WatchlistEntry, Decimal)> =
        entries.iter().map(|e| (e, e.position_value())).collect();
    valued.sort_by(|a, b| b.1.cmp(&a.1));

    valued
        .into_iter()
        .enumerate()
        .map(|(index, (entry, value))| {
            let percentage = share_of(value, total);
            AllocationSlice {
                id: entry.id().clone(),
                label: entry.token.display_name(),
                value,
                percentage,
                percentage_label: allocation_percent(&percentage),
                color: PALETTE[index % PALETTE.len()],
            }
        })
        .collect()
}

fn share_of(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    value
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}
