//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the provider sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── TokenId ─────────────────────────────────────────────────────────────────

/// Newtype for the provider's stable token identifier (e.g. `"bitcoin"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TokenId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for TokenId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TokenId(s.to_string()))
    }
}

impl Serialize for TokenId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(TokenId(s))
    }
}

// ─── WalletAddress ───────────────────────────────────────────────────────────

/// An externally connected wallet address.
///
/// Stored verbatim; no checksum or format validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234…abcd` style shortening: first 6 and last 4 characters.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for WalletAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(WalletAddress(s))
    }
}

// ─── Holdings input ──────────────────────────────────────────────────────────

/// Coerce raw user input to a holdings quantity.
///
/// Empty, unparseable and negative input all degrade to zero.
pub fn parse_holdings(input: &str) -> Decimal {
    let trimmed = input.trim();
    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO);
    clamp_holdings(parsed)
}

/// Clamp a holdings quantity to the non-negative range.
pub fn clamp_holdings(holdings: Decimal) -> Decimal {
    if holdings.is_sign_negative() {
        Decimal::ZERO
    } else {
        holdings
    }
}
