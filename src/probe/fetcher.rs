//! Address probe trait and error types.

use thiserror::Error;

use super::{IpFamily, Observation};
use crate::transport::HttpError;

/// Error type for a single address probe.
///
/// Every variant is transient from the monitor's point of view: the failure
/// is logged and the next scheduled check tries again.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The echo service could not be reached.
    #[error("Address request failed: {0}")]
    Http(#[from] HttpError),

    /// The echo service answered with a non-success status.
    #[error("Address service returned HTTP {status}")]
    NonSuccessStatus {
        /// HTTP status code
        status: http::StatusCode,
    },

    /// The response body is not valid UTF-8.
    #[error("Address service returned a non-text body")]
    InvalidBody,

    /// The response body is empty after trimming.
    #[error("Address service returned an empty body")]
    EmptyBody,

    /// The response body does not parse as an IP address.
    #[error("Address service returned '{body}', which is not an IP address")]
    NotAnAddress {
        /// The trimmed body
        body: String,
    },

    /// The address belongs to the other family.
    #[error("Address service returned {address}, expected an {expected} address")]
    WrongFamily {
        /// The address received
        address: String,
        /// The family being watched
        expected: IpFamily,
    },
}

/// Trait for discovering the host's current global address.
///
/// # Design
///
/// - One call is one discovery attempt; implementations do not retry
/// - Calls are awaited one at a time by the monitor, never concurrently
/// - Tests substitute scripted implementations
pub trait AddressProbe: Send + Sync {
    /// Fetches the current address.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if the address cannot be determined.
    fn fetch(&self) -> impl std::future::Future<Output = Result<Observation, ProbeError>> + Send;
}
