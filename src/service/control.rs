//! Control requests, reported statuses and lifecycle phases.

/// A request delivered by the host supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// The operator asked the service to stop.
    Stop,
    /// The machine is shutting down.
    Shutdown,
    /// The supervisor asks for the current status.
    Interrogate,
    /// Any other control code, carried through for logging.
    Other(u32),
}

impl ControlRequest {
    /// Returns true for the two requests that end monitoring.
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop | Self::Shutdown)
    }
}

/// Service state as understood by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Starting up.
    StartPending,
    /// Monitoring.
    Running,
    /// Stop requested, final alert in flight.
    StopPending,
    /// Fully stopped.
    Stopped,
}

/// A status report sent back to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Current state
    pub state: ServiceState,
    /// Whether stop and shutdown requests are accepted
    pub accepts_stop: bool,
}

impl ServiceStatus {
    /// Status for `state`; only `Running` accepts stop requests.
    #[must_use]
    pub const fn new(state: ServiceState) -> Self {
        Self {
            state,
            accepts_stop: matches!(state, ServiceState::Running),
        }
    }
}

/// Internal phase of a [`super::ServiceLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// Created, monitor not spawned yet.
    #[default]
    NotStarted,
    /// Monitor task running.
    Running,
    /// Cancellation sent, waiting for the monitor to finish.
    StopRequested,
    /// Monitor finished.
    Stopped,
}

impl LifecyclePhase {
    /// The status the supervisor should see in this phase.
    #[must_use]
    pub const fn status(self) -> ServiceStatus {
        let state = match self {
            Self::NotStarted => ServiceState::StartPending,
            Self::Running => ServiceState::Running,
            Self::StopRequested => ServiceState::StopPending,
            Self::Stopped => ServiceState::Stopped,
        };
        ServiceStatus::new(state)
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::StopRequested => "stop requested",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
