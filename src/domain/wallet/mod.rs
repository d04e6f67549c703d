//! Wallet domain — display-only view of an externally connected wallet.
//!
//! The connection handshake belongs to an external wallet library. The core
//! only records the reported address and formats the reported balance.

use crate::shared::fmt::decimal::fixed;
use crate::shared::WalletAddress;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Connection report from the external wallet provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatus {
    pub is_connected: bool,
    pub address: Option<String>,
    pub balance: Option<String>,
}

impl WalletStatus {
    /// The address to store, if the wallet is connected and reported one.
    pub fn connected_address(&self) -> Option<WalletAddress> {
        if !self.is_connected {
            return None;
        }
        self.address
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(WalletAddress::from)
    }

    /// Balance for display: `"0.00"` when absent, `"< 0.01"` for dust.
    pub fn display_balance(&self) -> String {
        format_balance(self.balance.as_deref())
    }
}

/// Format a native-unit balance string for display.
///
/// Units are not validated; unparseable input renders as `"0.00"`.
pub fn format_balance(balance: Option<&str>) -> String {
    let Some(raw) = balance else {
        return "0.00".to_string();
    };
    let amount = Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .unwrap_or(Decimal::ZERO);
    if amount < Decimal::new(1, 2) {
        return if amount.is_zero() {
            "0.00".to_string()
        } else {
            "< 0.01".to_string()
        };
    }
    fixed(&amount, 2)
}
