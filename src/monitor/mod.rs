//! Monitor layer: change detection and the periodic check loop.
//!
//! This module provides:
//! - Change detection between consecutive observations ([`ChangeTracker`], [`Verdict`])
//! - The check/alert cycle with cooperative shutdown ([`MonitorLoop`])

mod cycle;
mod tracker;


pub use cycle::{MAX_CHECK_INTERVAL, MonitorLoop};
pub use tracker::{ChangeTracker, Verdict};
