//! Foreground host adapter: console process, stopped by Ctrl+C or SIGTERM.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::signal;
use tokio::sync::mpsc;

use super::{ConsoleReporter, ControlRequest, ServiceEntry, ServiceError, SupervisorLink};

/// Runs `entry` on the calling thread with no supervisor attached.
///
/// Status reports go to the debug log. The only control request is
/// [`ControlRequest::Shutdown`], sent on Ctrl+C or SIGTERM. If the signal
/// handlers cannot be installed the process keeps running until killed.
///
/// # Errors
///
/// Returns whatever `entry` returns.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
pub fn run_foreground(handle: &Handle, entry: ServiceEntry) -> Result<(), ServiceError> {
    run_until_signal(handle, entry, shutdown_signal())
}

/// Runs `entry`, sending `Shutdown` when `signal` resolves successfully.
fn run_until_signal<S>(handle: &Handle, entry: ServiceEntry, signal: S) -> Result<(), ServiceError>
where
    S: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    handle.spawn(async move {
        match signal.await {
            Ok(()) => {
                tracing::info!("Shutdown signal received, stopping...");
                let _ = tx.send(ControlRequest::Shutdown);
            }
            Err(e) => {
                tracing::error!("Failed to install signal handlers, running until killed: {e}");
                // Holding the sender keeps the control channel open.
                std::future::pending::<()>().await;
                drop(tx);
            }
        }
    });

    tracing::info!("Running in foreground, press Ctrl+C to stop");
    entry(SupervisorLink::new(rx, ConsoleReporter))
}

/// Completes when Ctrl+C (or SIGTERM on Unix) is received.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    let terminate = {
        let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        async move {
            stream.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        result = signal::ctrl_c() => result,
        () = terminate => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorLoop;
    use crate::service::serve;
    use crate::test_fixtures::{RecordingChannel, ScriptedProbe};
    use std::time::Duration;
    use tokio::sync::mpsc::error::TryRecvError;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn signal_stops_monitor_with_final_alert() {
        let runtime = runtime();
        let handle = runtime.handle().clone();
        let channel = RecordingChannel::new();
        let monitor = MonitorLoop::new(
            ScriptedProbe::new().address("2001:db8::1"),
            channel.clone(),
            Duration::from_secs(3600),
        );

        let entry_handle = handle.clone();
        let entry: ServiceEntry = Box::new(move |link| entry_handle.block_on(serve(monitor, link)));

        run_until_signal(&handle, entry, async { Ok(()) }).unwrap();

        let sent = channel.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].contains("Service stopped"));
    }

    #[test]
    fn signal_failure_keeps_control_channel_open() {
        let runtime = runtime();
        let handle = runtime.handle().clone();

        let entry_handle = handle.clone();
        let entry: ServiceEntry = Box::new(move |mut link| {
            entry_handle.block_on(async { tokio::time::sleep(Duration::from_millis(50)).await });
            assert_eq!(link.controls.try_recv(), Err(TryRecvError::Empty));
            Ok(())
        });

        let signal = async { Err(std::io::Error::other("no signals here")) };
        run_until_signal(&handle, entry, signal).unwrap();
    }
}
