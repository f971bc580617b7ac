//! IPv6 Monitor: global address change alerts over Telegram
//!
//! A library for periodically discovering the host's global IP address,
//! detecting changes between checks, and alerting a Telegram chat, hosted
//! either as a Windows service or as a foreground process.

pub mod alert;
pub mod config;
pub mod monitor;
pub mod probe;
pub mod service;
pub mod transport;

#[cfg(test)]
mod test_fixtures;
