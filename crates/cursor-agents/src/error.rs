//! Error types for the cursor-agents crate.

use thiserror::Error;

/// Errors returned by the Background Agents API client.
///
/// Variants fall into four groups: transport (`Network`), remote
/// (`Unauthorized`, `RateLimited`, `Status`), decode (`Decode`) and local
/// validation (`InvalidRequest`). Consumers that only need display text can
/// rely on the `Display` implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The API key was rejected.
    #[error("Unauthorized: check your API key (run `bac init`)")]
    Unauthorized,

    /// Too many requests; the server may say when to retry.
    #[error("Rate limited{}", retry_after.as_ref().map(|r| format!(" (retry after {r})")).unwrap_or_default())]
    RateLimited {
        /// Value of the `Retry-After` header, if present.
        retry_after: Option<String>,
    },

    /// Any other non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the server.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Error decoding response: {0}")]
    Decode(String),

    /// The request was rejected locally before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns `true` for failures raised before any network traffic.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::InvalidRequest(_))
    }
}
