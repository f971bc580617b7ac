//! The address value produced by a probe.

use std::fmt;

/// One observed address, as reported by the echo service.
///
/// The value is kept exactly as received (after trimming surrounding
/// whitespace). Two observations are equal only if their text is identical;
/// no normalization of address notation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Observation(String);

impl Observation {
    /// Wraps an address string.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Returns the address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the observation, returning the address text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Observation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Observation {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Observation {
    fn from(address: String) -> Self {
        Self(address)
    }
}
