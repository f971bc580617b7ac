//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Only transport-level failures live here. A response with a non-success
/// status is still a response; callers decide what it means.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed (DNS, refused, TLS, reset, ...).
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not answer within the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
