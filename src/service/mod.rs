//! Service hosting: lifecycle state machine and host adapters.
//!
//! The monitor runs either under the Windows Service Control Manager or as a
//! foreground console process. Both hosts drive the same
//! [`ServiceLifecycle`] through a [`SupervisorLink`].

mod control;
mod error;
mod foreground;
mod host;
mod lifecycle;
pub mod platform;


pub use control::{ControlRequest, LifecyclePhase, ServiceState, ServiceStatus};
pub use error::ServiceError;
pub use foreground::run_foreground;
pub use host::{ConsoleReporter, Dispatch, ServiceEntry, StatusReporter, SupervisorLink};
pub use lifecycle::{ServiceLifecycle, serve};
