//! Application execution logic.
//!
//! Builds the monitor from the validated configuration and hands it to the
//! service host: the Service Control Manager when the process was started
//! by it, otherwise the foreground adapter.

use thiserror::Error;
use tokio::runtime::Handle;

use ipv6_monitor::alert::{AlertError, TelegramChannel};
use ipv6_monitor::config::ValidatedConfig;
use ipv6_monitor::monitor::MonitorLoop;
use ipv6_monitor::probe::HttpEchoProbe;
use ipv6_monitor::service::{Dispatch, ServiceEntry, ServiceError, platform, run_foreground, serve};
use ipv6_monitor::transport::ReqwestClient;

/// Type alias for the application's monitor.
type AppMonitor = MonitorLoop<HttpEchoProbe<ReqwestClient>, TelegramChannel<ReqwestClient>>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The Telegram channel could not be built from the configuration.
    #[error("Failed to create alert channel: {0}")]
    AlertChannel(#[source] AlertError),

    /// The service host failed.
    #[error("Service host failed: {0}")]
    Service(#[from] ServiceError),
}

/// Executes the application until the service is stopped.
///
/// This function:
/// 1. Builds the probe, the Telegram channel and the monitor
/// 2. Offers the monitor to the Service Control Manager
/// 3. Falls back to foreground mode when no supervisor is present
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client or the alert channel cannot be built
/// - The service dispatcher fails
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific service APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub fn execute(handle: &Handle, config: ValidatedConfig) -> Result<(), RunError> {
    let monitor = create_monitor(&config)?;

    let entry_handle = handle.clone();
    let entry: ServiceEntry = Box::new(move |link| entry_handle.block_on(serve(monitor, link)));

    match platform::dispatch(&config.service_name, entry)? {
        Dispatch::Completed => {
            tracing::info!("Service {} stopped", config.service_name);
            Ok(())
        }
        Dispatch::Unsupervised(entry) => {
            tracing::info!("Running in console mode");
            run_foreground(handle, entry)?;
            Ok(())
        }
    }
}

/// Creates the monitor from configuration.
fn create_monitor(config: &ValidatedConfig) -> Result<AppMonitor, RunError> {
    let client = ReqwestClient::with_timeout(config.http_timeout).map_err(RunError::HttpClient)?;

    let probe = HttpEchoProbe::new(client.clone(), config.probe_url.clone(), config.family);

    let channel = TelegramChannel::new(
        client,
        &config.api_url,
        &config.bot_token,
        config.chat_id.clone(),
    )
    .map_err(RunError::AlertChannel)?;

    Ok(MonitorLoop::new(probe, channel, config.check_interval)
        .with_family(config.family)
        .with_templates(config.templates.clone())
        .with_late_start_alert(config.late_start_alert))
}
