//! Change detection between consecutive observations.

use crate::probe::Observation;

/// Classification of one observation against the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No earlier observation existed; this one is now the baseline.
    FirstObservation,
    /// Same address as last time.
    Unchanged,
    /// The address differs; carries the replaced baseline.
    ChangedFrom(Observation),
}

/// Remembers the last observed address and reports transitions.
///
/// The tracker is owned by the monitor loop and only ever touched from its
/// task, so it needs no synchronization.
///
/// # Example
///
/// ```
/// use ipv6_monitor::monitor::{ChangeTracker, Verdict};
/// use ipv6_monitor::probe::Observation;
///
/// let mut tracker = ChangeTracker::new();
/// assert_eq!(tracker.observe("2001:db8::1".into()), Verdict::FirstObservation);
/// assert_eq!(tracker.observe("2001:db8::1".into()), Verdict::Unchanged);
/// assert_eq!(
///     tracker.observe("2001:db8::2".into()),
///     Verdict::ChangedFrom(Observation::from("2001:db8::1"))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    last: Option<Observation>,
}

impl ChangeTracker {
    /// Creates a tracker with no baseline.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Classifies `current` and updates the baseline when it changed.
    ///
    /// An `Unchanged` verdict leaves the stored baseline untouched.
    pub fn observe(&mut self, current: Observation) -> Verdict {
        if let Some(previous) = self.last.as_mut() {
            if *previous == current {
                return Verdict::Unchanged;
            }
            return Verdict::ChangedFrom(std::mem::replace(previous, current));
        }

        self.last = Some(current);
        Verdict::FirstObservation
    }

    /// Returns the current baseline, if any.
    #[must_use]
    pub const fn last(&self) -> Option<&Observation> {
        self.last.as_ref()
    }
}
