//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs` — Rich domain types
//! - `wire.rs` — Raw serde structs matching provider responses
//! - `convert.rs` — `From` conversions from wire types
//! - `state.rs` — State containers with update methods
//! - `client.rs` — Sub-client with HTTP methods

pub mod allocation;
pub mod token;
pub mod wallet;
pub mod watchlist;
