//! The address family being watched.

use std::fmt;
use std::net::IpAddr;

/// IP address family to monitor.
///
/// Exactly one family is tracked per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpFamily {
    /// IPv4 addresses
    V4,
    /// IPv6 addresses
    #[default]
    V6,
}

impl IpFamily {
    /// Address-echo endpoint that answers over this family only.
    #[must_use]
    pub const fn default_probe_url(self) -> &'static str {
        match self {
            Self::V4 => "https://ipv4.icanhazip.com",
            Self::V6 => "https://ipv6.icanhazip.com",
        }
    }

    /// Returns true if the address belongs to this family.
    #[must_use]
    pub const fn matches(self, address: &IpAddr) -> bool {
        match self {
            Self::V4 => address.is_ipv4(),
            Self::V6 => address.is_ipv6(),
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}
