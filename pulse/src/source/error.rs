//! Fetch error type.

use thiserror::Error;

/// Why a fetch produced no data.
///
/// Every variant is transient from the dashboard's point of view: the panel
/// records it, keeps any older data, and retries on its own schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status code.
    #[error("API returned {status}")]
    Status { status: u16 },

    /// The response body could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A required setting (API key, username) is missing.
    #[error("{0} is not configured")]
    MissingConfig(&'static str),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
