//! Service hosting error types.

use thiserror::Error;

use super::LifecyclePhase;

/// Error type for service lifecycle and host integration.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A lifecycle operation was called in the wrong phase.
    #[error("Cannot {action} a service that is {from}")]
    InvalidTransition {
        /// Phase at the time of the call
        from: LifecyclePhase,
        /// The attempted operation
        action: &'static str,
    },

    /// The supervisor did not accept a status report.
    #[error("Failed to report service status: {0}")]
    Report(String),

    /// The service entry was taken by the dispatcher and cannot be returned.
    #[error("Service entry was already consumed by the dispatcher")]
    EntryConsumed,

    /// A Windows service API call failed.
    #[cfg(windows)]
    #[error("Service API call failed: {0}")]
    Platform(#[from] windows::core::Error),
}
