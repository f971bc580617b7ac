//! Windows Service Control Manager integration.
//!
//! `StartServiceCtrlDispatcherW` blocks the calling thread and invokes
//! `service_main` on a thread of its own. The control handler registered there
//! is a plain callback, so control codes are forwarded into a tokio channel
//! and picked up by the lifecycle's control pump.

use std::ffi::c_void;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use windows::Win32::Foundation::{
    ERROR_CALL_NOT_IMPLEMENTED, ERROR_FAILED_SERVICE_CONTROLLER_CONNECT,
    ERROR_SERVICE_SPECIFIC_ERROR, NO_ERROR,
};
use windows::Win32::System::Services::{
    RegisterServiceCtrlHandlerExW, SERVICE_ACCEPT_SHUTDOWN, SERVICE_ACCEPT_STOP,
    SERVICE_CONTROL_INTERROGATE, SERVICE_CONTROL_SHUTDOWN, SERVICE_CONTROL_STOP, SERVICE_RUNNING,
    SERVICE_START_PENDING, SERVICE_STATUS, SERVICE_STATUS_CURRENT_STATE, SERVICE_STATUS_HANDLE,
    SERVICE_STOP_PENDING, SERVICE_STOPPED, SERVICE_TABLE_ENTRYW, SERVICE_WIN32_OWN_PROCESS,
    SetServiceStatus, StartServiceCtrlDispatcherW,
};
use windows::core::{HSTRING, PWSTR};

use crate::service::{
    ControlRequest, Dispatch, ServiceEntry, ServiceError, ServiceState, ServiceStatus,
    StatusReporter, SupervisorLink,
};

/// Wait hint reported with pending states, in milliseconds.
///
/// The stop path sends one alert over HTTP, bounded by the request timeout.
const PENDING_WAIT_HINT_MS: u32 = 30_000;

/// Service-specific exit code reported when the entry fails.
const ENTRY_FAILED_EXIT_CODE: u32 = 1;

/// Entry waiting to be picked up by `service_main`.
struct PendingService {
    name: String,
    entry: ServiceEntry,
}

/// One-shot hand-off to `service_main`, which receives no user context.
static PENDING: Mutex<Option<PendingService>> = Mutex::new(None);

fn store_pending(pending: PendingService) {
    *PENDING.lock().unwrap_or_else(PoisonError::into_inner) = Some(pending);
}

fn take_pending() -> Option<PendingService> {
    PENDING
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

/// Connects to the Service Control Manager and runs `entry` as the service.
///
/// Blocks until the service has stopped. When the process was not started by
/// the SCM, returns [`Dispatch::Unsupervised`] with `entry` untouched.
///
/// # Errors
///
/// Returns [`ServiceError::Platform`] if the dispatcher fails for any other
/// reason.
///
/// Excluded from coverage - requires the Service Control Manager.
#[cfg(not(tarpaulin_include))]
pub fn dispatch(service_name: &str, entry: ServiceEntry) -> Result<Dispatch, ServiceError> {
    store_pending(PendingService {
        name: service_name.to_string(),
        entry,
    });

    let name = HSTRING::from(service_name);
    let table = [
        SERVICE_TABLE_ENTRYW {
            lpServiceName: PWSTR(name.as_ptr().cast_mut()),
            lpServiceProc: Some(service_main),
        },
        SERVICE_TABLE_ENTRYW {
            lpServiceName: PWSTR::null(),
            lpServiceProc: None,
        },
    ];

    // SAFETY: The table is terminated by a null entry, and both the table and
    // the name it points to outlive the call, which blocks until the service
    // has stopped.
    match unsafe { StartServiceCtrlDispatcherW(table.as_ptr()) } {
        Ok(()) => Ok(Dispatch::Completed),
        Err(e) if e.code() == ERROR_FAILED_SERVICE_CONTROLLER_CONNECT.to_hresult() => {
            tracing::debug!("Not started by the Service Control Manager");
            take_pending()
                .map(|pending| Dispatch::Unsupervised(pending.entry))
                .ok_or(ServiceError::EntryConsumed)
        }
        Err(e) => {
            take_pending();
            Err(e.into())
        }
    }
}

/// Called by the SCM on its own thread once the dispatcher is connected.
#[cfg(not(tarpaulin_include))]
unsafe extern "system" fn service_main(_argc: u32, _argv: *mut PWSTR) {
    let Some(PendingService { name, entry }) = take_pending() else {
        tracing::error!("Service started without a pending entry");
        return;
    };

    if let Err(e) = run_service(&name, entry) {
        tracing::error!("Service {name} failed: {e}");
    }
}

/// Registers the control handler and runs the entry to completion.
#[cfg(not(tarpaulin_include))]
fn run_service(name: &str, entry: ServiceEntry) -> Result<(), ServiceError> {
    let (sender, controls) = mpsc::unbounded_channel();
    let context = Box::into_raw(Box::new(HandlerContext { sender }));

    let service_name = HSTRING::from(name);
    // SAFETY: `control_handler` matches the handler signature and `context`
    // stays valid for the rest of the process.
    let registered = unsafe {
        RegisterServiceCtrlHandlerExW(
            &service_name,
            Some(control_handler),
            Some(context.cast_const().cast::<c_void>()),
        )
    };

    let handle = match registered {
        Ok(handle) => handle,
        Err(e) => {
            // SAFETY: Registration failed, so the handler never saw `context`.
            drop(unsafe { Box::from_raw(context) });
            return Err(e.into());
        }
    };

    // The handler may fire until the process exits; `context` is never reclaimed.
    let reporter = ScmReporter::new(handle);
    let result = entry(SupervisorLink::new(controls, reporter.clone()));

    if result.is_err() {
        if let Err(e) = reporter.report_failure() {
            tracing::warn!("{e}");
        }
    }

    result
}

/// Context handed to `control_handler`.
struct HandlerContext {
    sender: mpsc::UnboundedSender<ControlRequest>,
}

/// Forwards SCM control codes into the lifecycle's control channel.
#[cfg(not(tarpaulin_include))]
unsafe extern "system" fn control_handler(
    control: u32,
    _event_type: u32,
    _event_data: *mut c_void,
    context: *mut c_void,
) -> u32 {
    // SAFETY: `context` is the `HandlerContext` leaked in `run_service`.
    let context = unsafe { &*context.cast::<HandlerContext>() };

    let request = to_request(control);
    if context.sender.send(request).is_err() {
        tracing::debug!("Control request {request:?} arrived after the service stopped");
    }

    match request {
        ControlRequest::Other(_) => ERROR_CALL_NOT_IMPLEMENTED.0,
        _ => NO_ERROR.0,
    }
}

const fn to_request(control: u32) -> ControlRequest {
    match control {
        SERVICE_CONTROL_STOP => ControlRequest::Stop,
        SERVICE_CONTROL_SHUTDOWN => ControlRequest::Shutdown,
        SERVICE_CONTROL_INTERROGATE => ControlRequest::Interrogate,
        other => ControlRequest::Other(other),
    }
}

/// [`StatusReporter`] backed by `SetServiceStatus`.
#[derive(Clone)]
struct ScmReporter {
    handle: SERVICE_STATUS_HANDLE,
    checkpoint: Arc<AtomicU32>,
}

// SAFETY: SERVICE_STATUS_HANDLE is an opaque handle that SetServiceStatus
// accepts from any thread.
unsafe impl Send for ScmReporter {}
// SAFETY: See above; the only mutable state is atomic.
unsafe impl Sync for ScmReporter {}

impl ScmReporter {
    fn new(handle: SERVICE_STATUS_HANDLE) -> Self {
        Self {
            handle,
            checkpoint: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Reports `SERVICE_STOPPED` with a service-specific failure code.
    fn report_failure(&self) -> Result<(), ServiceError> {
        self.set(&SERVICE_STATUS {
            dwServiceType: SERVICE_WIN32_OWN_PROCESS,
            dwCurrentState: SERVICE_STOPPED,
            dwControlsAccepted: 0,
            dwWin32ExitCode: ERROR_SERVICE_SPECIFIC_ERROR.0,
            dwServiceSpecificExitCode: ENTRY_FAILED_EXIT_CODE,
            dwCheckPoint: 0,
            dwWaitHint: 0,
        })
    }

    fn set(&self, status: &SERVICE_STATUS) -> Result<(), ServiceError> {
        // SAFETY: `handle` came from RegisterServiceCtrlHandlerExW and
        // `status` is a valid, fully initialised struct.
        unsafe { SetServiceStatus(self.handle, status) }?;
        Ok(())
    }
}

impl StatusReporter for ScmReporter {
    fn report(&self, status: ServiceStatus) -> Result<(), ServiceError> {
        let current_state = to_scm_state(status.state);
        let pending = matches!(
            status.state,
            ServiceState::StartPending | ServiceState::StopPending
        );

        let checkpoint = if pending {
            self.checkpoint.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.checkpoint.store(0, Ordering::Relaxed);
            0
        };

        let controls_accepted = if status.accepts_stop {
            SERVICE_ACCEPT_STOP | SERVICE_ACCEPT_SHUTDOWN
        } else {
            0
        };

        self.set(&SERVICE_STATUS {
            dwServiceType: SERVICE_WIN32_OWN_PROCESS,
            dwCurrentState: current_state,
            dwControlsAccepted: controls_accepted,
            dwWin32ExitCode: NO_ERROR.0,
            dwServiceSpecificExitCode: 0,
            dwCheckPoint: checkpoint,
            dwWaitHint: if pending { PENDING_WAIT_HINT_MS } else { 0 },
        })
    }
}

const fn to_scm_state(state: ServiceState) -> SERVICE_STATUS_CURRENT_STATE {
    match state {
        ServiceState::StartPending => SERVICE_START_PENDING,
        ServiceState::Running => SERVICE_RUNNING,
        ServiceState::StopPending => SERVICE_STOP_PENDING,
        ServiceState::Stopped => SERVICE_STOPPED,
    }
}
