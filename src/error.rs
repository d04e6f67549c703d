//! Unified error types.

use thiserror::Error;

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Market-data HTTP errors.
///
/// The state manager never inspects the variant: every provider failure
/// collapses to one opaque message per command.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Key-value store errors. Always absorbed by the persistence adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
