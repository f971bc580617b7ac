//! The seam between the lifecycle and whatever hosts the process.
//!
//! A host adapter supplies two things: a stream of [`ControlRequest`]s and a
//! [`StatusReporter`]. The SCM adapter and the foreground adapter are the two
//! implementations.

use tokio::sync::mpsc;

use super::{ControlRequest, ServiceError, ServiceStatus};

/// Trait for reporting status back to the host supervisor.
///
/// Called synchronously from the control pump; implementations must not block
/// for long.
pub trait StatusReporter: Send + Sync {
    /// Reports `status`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the supervisor rejected the report.
    fn report(&self, status: ServiceStatus) -> Result<(), ServiceError>;
}

impl<T: StatusReporter + ?Sized> StatusReporter for Box<T> {
    fn report(&self, status: ServiceStatus) -> Result<(), ServiceError> {
        (**self).report(status)
    }
}

/// Reporter for foreground mode: there is no supervisor, statuses are logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn report(&self, status: ServiceStatus) -> Result<(), ServiceError> {
        tracing::debug!(
            state = ?status.state,
            accepts_stop = status.accepts_stop,
            "Service status"
        );
        Ok(())
    }
}

/// Everything a service entry needs from its host.
pub struct SupervisorLink {
    /// Control requests, in arrival order. Closing the channel means shutdown.
    pub controls: mpsc::UnboundedReceiver<ControlRequest>,
    /// Where status reports go.
    pub reporter: Box<dyn StatusReporter>,
}

impl SupervisorLink {
    /// Bundles a control receiver and a reporter.
    #[must_use]
    pub fn new(
        controls: mpsc::UnboundedReceiver<ControlRequest>,
        reporter: impl StatusReporter + 'static,
    ) -> Self {
        Self {
            controls,
            reporter: Box::new(reporter),
        }
    }
}

impl std::fmt::Debug for SupervisorLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupervisorLink")
            .field("controls", &self.controls)
            .finish_non_exhaustive()
    }
}

/// The service body: runs to completion on the thread the host calls it from.
pub type ServiceEntry = Box<dyn FnOnce(SupervisorLink) -> Result<(), ServiceError> + Send>;

/// Outcome of trying to hand the process to the host supervisor.
pub enum Dispatch {
    /// The supervisor ran the entry and the service has stopped.
    Completed,
    /// No supervisor is present; the entry is handed back unused.
    Unsupervised(ServiceEntry),
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => f.write_str("Completed"),
            Self::Unsupervised(_) => f.write_str("Unsupervised(..)"),
        }
    }
}
