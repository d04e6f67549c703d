//! HTTP client layer — `MarketHttp`, one method per market-data endpoint.

pub mod client;

pub use client::MarketHttp;
