//! The periodic check/alert cycle.
//!
//! [`MonitorLoop`] probes the address once at startup, then once per tick of a
//! fixed-interval timer, and sends an alert for every transition it sees.
//! Probe and alert failures are logged and absorbed; the only way out of the
//! loop is the shutdown token.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::{ChangeTracker, Verdict};
use crate::alert::{Alert, AlertChannel, AlertTemplates};
use crate::probe::{AddressProbe, IpFamily, Observation};

/// Longest accepted check interval: one week.
pub const MAX_CHECK_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Stand-in deadline when `now + interval` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Periodic address monitor.
///
/// # Type Parameters
///
/// * `P` - The [`AddressProbe`] used to discover the current address
/// * `A` - The [`AlertChannel`] alerts are delivered through
///
/// # Example
///
/// ```ignore
/// use ipv6_monitor::monitor::MonitorLoop;
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// let monitor = MonitorLoop::new(probe, channel, Duration::from_secs(300));
/// let shutdown = CancellationToken::new();
/// let task = tokio::spawn(monitor.run(shutdown.clone()));
///
/// // later
/// shutdown.cancel();
/// let tracker = task.await?;
/// ```
#[derive(Debug)]
pub struct MonitorLoop<P, A> {
    probe: P,
    channel: A,
    interval: Duration,
    family: IpFamily,
    templates: AlertTemplates,
    late_start_alert: bool,
    tracker: ChangeTracker,
}

impl<P, A> MonitorLoop<P, A> {
    /// Creates a monitor checking every `interval`.
    ///
    /// Defaults to IPv6, the built-in alert texts, and no alert for a first
    /// address obtained after a failed startup check.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero or longer than [`MAX_CHECK_INTERVAL`].
    /// Configuration validation rejects both before a monitor is built.
    #[must_use]
    pub fn new(probe: P, channel: A, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "check interval must be non-zero");
        assert!(
            interval <= MAX_CHECK_INTERVAL,
            "check interval must not exceed {}s",
            MAX_CHECK_INTERVAL.as_secs()
        );
        Self {
            probe,
            channel,
            interval,
            family: IpFamily::default(),
            templates: AlertTemplates::default(),
            late_start_alert: false,
            tracker: ChangeTracker::new(),
        }
    }

    /// Sets the family named in alert texts and log lines.
    #[must_use]
    pub const fn with_family(mut self, family: IpFamily) -> Self {
        self.family = family;
        self
    }

    /// Sets the alert templates.
    #[must_use]
    pub fn with_templates(mut self, templates: AlertTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Sends the "started" alert when the first address only becomes known
    /// on a periodic check because the startup check failed.
    #[must_use]
    pub const fn with_late_start_alert(mut self, enabled: bool) -> Self {
        self.late_start_alert = enabled;
        self
    }

    /// Returns the check interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the watched family.
    #[must_use]
    pub const fn family(&self) -> IpFamily {
        self.family
    }

    /// Returns the change tracker state.
    #[must_use]
    pub const fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }
}

impl<P: AddressProbe, A: AlertChannel> MonitorLoop<P, A> {
    /// Runs until `shutdown` is cancelled, then sends the "stopped" alert.
    ///
    /// The token is only observed between checks: a probe or alert already in
    /// flight completes first. Returns the tracker as it was at shutdown.
    pub async fn run(mut self, shutdown: CancellationToken) -> ChangeTracker {
        tracing::info!(
            "Monitoring {} address every {}s",
            self.family,
            self.interval.as_secs()
        );

        self.startup().await;

        let mut ticker = time::interval_at(first_tick(self.interval), self.interval);
        // A slow check pushes the schedule back instead of bunching ticks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                () = shutdown.cancelled() => break,

                _ = ticker.tick() => self.check().await,
            }
        }

        tracing::info!("Stopping {} monitoring", self.family);
        self.notify(Alert::Stopped).await;

        self.tracker
    }

    /// Immediate first check, not gated by the timer.
    async fn startup(&mut self) {
        match self.probe.fetch().await {
            Ok(current) => {
                tracing::info!("Initial {} address detected: {current}", self.family);
                self.tracker.observe(current.clone());
                self.notify(Alert::Started {
                    address: current.as_str(),
                })
                .await;
            }
            Err(e) => {
                tracing::error!("Failed to get initial {} address: {e}", self.family);
            }
        }
    }

    /// One periodic check.
    async fn check(&mut self) {
        let current = match self.probe.fetch().await {
            Ok(current) => current,
            Err(e) => {
                tracing::error!("Failed to get {} address: {e}", self.family);
                return;
            }
        };

        tracing::debug!("{} check completed: {current}", self.family);

        match self.tracker.observe(current.clone()) {
            Verdict::Unchanged => {}
            Verdict::FirstObservation => self.first_seen_late(&current).await,
            Verdict::ChangedFrom(previous) => {
                tracing::info!(
                    old = %previous,
                    new = %current,
                    "{} address changed",
                    self.family
                );
                self.notify(Alert::Changed {
                    previous: previous.as_str(),
                    current: current.as_str(),
                })
                .await;
            }
        }
    }

    /// The startup check failed and a periodic check produced the first address.
    async fn first_seen_late(&self, current: &Observation) {
        if self.late_start_alert {
            tracing::info!("First {} address detected: {current}", self.family);
            self.notify(Alert::Started {
                address: current.as_str(),
            })
            .await;
        } else {
            tracing::info!(
                "First {} address detected: {current} (startup check had failed, no alert sent)",
                self.family
            );
        }
    }

    /// Renders and sends one alert. Failures are logged, never propagated.
    async fn notify(&self, alert: Alert<'_>) {
        let kind = alert.kind();

        let text = match self.templates.render(&alert, self.family) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to render {kind} alert: {e}");
                return;
            }
        };

        match self.channel.send(&text).await {
            Ok(()) => tracing::debug!("Sent {kind} alert"),
            Err(e) => tracing::error!("Failed to send {kind} alert: {e}"),
        }
    }
}

/// Deadline of the first periodic check, one interval from now.
pub(super) fn first_tick(interval: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(interval)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}
