//! Address discovery.
//!
//! This module provides:
//! - The observed address value ([`Observation`])
//! - The address family being watched ([`IpFamily`])
//! - The probe abstraction the monitor is written against ([`AddressProbe`])
//! - The production probe querying an address-echo service ([`HttpEchoProbe`])

mod echo;
mod family;
mod fetcher;
mod observation;


pub use echo::HttpEchoProbe;
pub use family::IpFamily;
pub use fetcher::{AddressProbe, ProbeError};
pub use observation::Observation;
