//! Alert channel trait and error types.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for alert rendering and delivery.
///
/// A failed alert is logged by the monitor and never retried or escalated.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The messaging API could not be reached.
    #[error("Alert request failed: {0}")]
    Http(#[from] HttpError),

    /// The messaging API refused the message.
    #[error(
        "Bot API returned HTTP {status}: {}",
        description.as_deref().unwrap_or("no description")
    )]
    Rejected {
        /// HTTP status code
        status: http::StatusCode,
        /// Error description reported by the API, if any
        description: Option<String>,
    },

    /// The alert text could not be rendered from its template.
    #[error("Failed to render alert text: {0}")]
    Render(String),

    /// The API base URL cannot carry a method path.
    #[error("Invalid bot API URL '{0}'")]
    InvalidEndpoint(String),
}

/// Trait for delivering one formatted alert to its destination.
///
/// # Implementation Notes
///
/// - One call is one delivery attempt; implementations do not retry
/// - The text is final: formatting happens before the call
pub trait AlertChannel: Send + Sync {
    /// Delivers `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError`] if the message was not accepted.
    fn send(&self, text: &str) -> impl std::future::Future<Output = Result<(), AlertError>> + Send;
}
