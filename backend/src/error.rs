//! Error types for the search backend layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The backend could not be reached or the transfer failed midway.
    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(#[source] reqwest::Error),

    /// The backend answered with a 4xx/5xx status.
    #[error("Search backend rejected query ({status}): {body}")]
    BackendRejected { status: u16, body: String },

    #[error("Invalid search backend response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Unexpected search backend response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
