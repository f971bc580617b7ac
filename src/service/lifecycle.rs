//! Start/stop state machine between the host supervisor and the monitor.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{ControlRequest, LifecyclePhase, ServiceError, StatusReporter, SupervisorLink};
use crate::alert::AlertChannel;
use crate::monitor::{ChangeTracker, MonitorLoop};
use crate::probe::AddressProbe;

/// Drives one [`MonitorLoop`] through its service lifecycle.
///
/// ```text
/// NotStarted --start--> Running --Stop/Shutdown--> StopRequested --wait_stopped--> Stopped
///                          ^  |
///                          +--+ Interrogate / unknown
/// ```
///
/// Every transition is reported through the [`StatusReporter`]. A failed
/// report is logged and does not change the phase.
pub struct ServiceLifecycle<R> {
    reporter: R,
    phase: LifecyclePhase,
    shutdown: CancellationToken,
    task: Option<JoinHandle<ChangeTracker>>,
}

impl<R> std::fmt::Debug for ServiceLifecycle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceLifecycle")
            .field("phase", &self.phase)
            .field("cancelled", &self.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<R: StatusReporter> ServiceLifecycle<R> {
    /// Creates a lifecycle that has not started yet.
    #[must_use]
    pub fn new(reporter: R) -> Self {
        Self {
            reporter,
            phase: LifecyclePhase::NotStarted,
            shutdown: CancellationToken::new(),
            task: None,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Spawns the monitor on the current tokio runtime.
    ///
    /// Reports `StartPending`, then `Running` once the task is spawned.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidTransition`] if already started.
    pub fn start<P, A>(&mut self, monitor: MonitorLoop<P, A>) -> Result<(), ServiceError>
    where
        P: AddressProbe + 'static,
        A: AlertChannel + 'static,
    {
        if self.phase != LifecyclePhase::NotStarted {
            return Err(ServiceError::InvalidTransition {
                from: self.phase,
                action: "start",
            });
        }

        self.report();

        let token = self.shutdown.child_token();
        self.task = Some(tokio::spawn(monitor.run(token)));

        self.phase = LifecyclePhase::Running;
        tracing::info!("Service running");
        self.report();

        Ok(())
    }

    /// Applies one control request.
    ///
    /// Only meaningful while running; anything arriving in another phase is
    /// ignored.
    pub fn handle(&mut self, request: ControlRequest) {
        if self.phase != LifecyclePhase::Running {
            tracing::debug!("Ignoring {request:?} while {}", self.phase);
            return;
        }

        match request {
            ControlRequest::Stop | ControlRequest::Shutdown => {
                tracing::info!("{request:?} requested, stopping monitor");
                self.shutdown.cancel();
                self.phase = LifecyclePhase::StopRequested;
                self.report();
            }
            ControlRequest::Interrogate => self.report(),
            ControlRequest::Other(code) => {
                tracing::error!("Unsupported control request: {code}");
            }
        }
    }

    /// Waits for the monitor to finish its final alert, then reports `Stopped`.
    ///
    /// A panic inside the monitor task is logged, not propagated.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidTransition`] unless a stop was requested.
    pub async fn wait_stopped(&mut self) -> Result<(), ServiceError> {
        if self.phase != LifecyclePhase::StopRequested {
            return Err(ServiceError::InvalidTransition {
                from: self.phase,
                action: "finish stopping",
            });
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(tracker) => match tracker.last() {
                    Some(last) => tracing::info!("Monitor stopped, last address {last}"),
                    None => tracing::info!("Monitor stopped, no address was ever observed"),
                },
                Err(e) => tracing::error!("Monitor task failed: {e}"),
            }
        }

        self.phase = LifecyclePhase::Stopped;
        self.report();

        Ok(())
    }

    fn report(&self) {
        if let Err(e) = self.reporter.report(self.phase.status()) {
            tracing::warn!("{e}");
        }
    }
}

/// Runs `monitor` under a host supervisor until it is told to stop.
///
/// Control requests are applied in arrival order. A closed control channel
/// is treated as [`ControlRequest::Shutdown`].
///
/// # Errors
///
/// Returns [`ServiceError`] if the lifecycle cannot start.
pub async fn serve<P, A>(monitor: MonitorLoop<P, A>, link: SupervisorLink) -> Result<(), ServiceError>
where
    P: AddressProbe + 'static,
    A: AlertChannel + 'static,
{
    let SupervisorLink {
        mut controls,
        reporter,
    } = link;

    let mut lifecycle = ServiceLifecycle::new(reporter);
    lifecycle.start(monitor)?;

    while lifecycle.phase() == LifecyclePhase::Running {
        let request = if let Some(request) = controls.recv().await {
            request
        } else {
            tracing::info!("Control channel closed, shutting down");
            ControlRequest::Shutdown
        };
        lifecycle.handle(request);
    }

    lifecycle.wait_stopped().await
}
