//! Portfolio state core: the reducer (`state`) and the async command
//! surface that drives it against a provider and a store (`manager`).

pub mod manager;
pub mod state;

pub use manager::PortfolioManager;
pub use state::{Completion, FetchKind, NetworkFailure, PortfolioState};
