//! Platform-specific supervisor integration.
//!
//! [`dispatch`] tries to hand the process to the host's service manager.
//!
//! # Platform Support
//!
//! - **Windows**: Service Control Manager via the `windows` crate.
//! - **Other platforms**: no supervisor; [`dispatch`] always hands the entry back.

use super::{Dispatch, ServiceEntry, ServiceError};

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::dispatch;

/// Hands `entry` back unused: there is no service manager to connect to.
///
/// # Errors
///
/// Never fails on this platform.
#[cfg(not(windows))]
#[allow(clippy::unnecessary_wraps)]
pub fn dispatch(service_name: &str, entry: ServiceEntry) -> Result<Dispatch, ServiceError> {
    tracing::debug!("No service manager on this platform, {service_name} runs in foreground");
    Ok(Dispatch::Unsupervised(entry))
}
