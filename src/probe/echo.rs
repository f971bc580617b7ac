//! Probe backed by a plain-text address-echo service.

use std::net::IpAddr;

use url::Url;

use super::{AddressProbe, IpFamily, Observation, ProbeError};
use crate::transport::{HttpClient, HttpRequest};

/// Discovers the global address by asking an echo service which address the
/// request came from.
///
/// The service is expected to answer a GET with the caller's address as the
/// whole body (`icanhazip.com` style). Because the endpoint is reachable over
/// one family only, the answer is also checked to belong to that family.
///
/// # Example
///
/// ```
/// use ipv6_monitor::probe::{HttpEchoProbe, IpFamily};
/// use ipv6_monitor::transport::ReqwestClient;
/// use std::time::Duration;
/// use url::Url;
///
/// let client = ReqwestClient::with_timeout(Duration::from_secs(30)).unwrap();
/// let probe = HttpEchoProbe::new(
///     client,
///     Url::parse("https://ipv6.icanhazip.com").unwrap(),
///     IpFamily::V6,
/// );
/// assert_eq!(probe.family(), IpFamily::V6);
/// ```
#[derive(Debug, Clone)]
pub struct HttpEchoProbe<H> {
    client: H,
    endpoint: Url,
    family: IpFamily,
}

impl<H> HttpEchoProbe<H> {
    /// Creates a probe querying `endpoint` and expecting `family` addresses.
    #[must_use]
    pub const fn new(client: H, endpoint: Url, family: IpFamily) -> Self {
        Self {
            client,
            endpoint,
            family,
        }
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the watched family.
    #[must_use]
    pub const fn family(&self) -> IpFamily {
        self.family
    }

    /// Validates a response body and turns it into an observation.
    fn parse_body(&self, body: &str) -> Result<Observation, ProbeError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(ProbeError::EmptyBody);
        }

        let address: IpAddr = trimmed.parse().map_err(|_| ProbeError::NotAnAddress {
            body: trimmed.to_string(),
        })?;

        if !self.family.matches(&address) {
            return Err(ProbeError::WrongFamily {
                address: trimmed.to_string(),
                expected: self.family,
            });
        }

        Ok(Observation::new(trimmed))
    }
}

impl<H: HttpClient> AddressProbe for HttpEchoProbe<H> {
    async fn fetch(&self) -> Result<Observation, ProbeError> {
        let response = self
            .client
            .request(HttpRequest::get(self.endpoint.clone()))
            .await?;

        if !response.is_success() {
            return Err(ProbeError::NonSuccessStatus {
                status: response.status,
            });
        }

        let body = response.body_text().ok_or(ProbeError::InvalidBody)?;
        self.parse_body(body)
    }
}
