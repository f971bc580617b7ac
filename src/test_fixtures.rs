//! Shared test doubles for the HTTP, probe, alert and status seams.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::alert::{AlertChannel, AlertError};
use crate::probe::{AddressProbe, Observation, ProbeError};
use crate::service::{ServiceError, ServiceStatus, StatusReporter};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// HTTP client that replays queued responses and records every request.
///
/// Clones share state, so a test can keep one handle and pass another to the
/// code under test. An exhausted queue answers with [`HttpError::Timeout`].
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, HttpError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.respond_bytes(status, body.as_bytes().to_vec())
    }

    pub fn respond_bytes(self, status: u16, body: Vec<u8>) -> Self {
        let response = HttpResponse::new(
            http::StatusCode::from_u16(status).unwrap(),
            http::HeaderMap::new(),
            body,
        );
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: HttpError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(HttpError::Timeout))
    }
}

/// Probe that returns a fixed script of results.
///
/// Once the script runs out every call fails, which leaves the tracker alone.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProbe {
    script: Arc<Mutex<VecDeque<Result<Observation, ProbeError>>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(self, address: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(Observation::from(address)));
        self
    }

    pub fn failure(self) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(ProbeError::EmptyBody));
        self
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl AddressProbe for ScriptedProbe {
    async fn fetch(&self) -> Result<Observation, ProbeError> {
        *self.calls.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProbeError::Http(HttpError::Timeout)))
    }
}

/// Alert channel that records every text it is asked to send.
///
/// A failing channel still records the attempt before returning an error.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    sent: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl AlertChannel for RecordingChannel {
    async fn send(&self, text: &str) -> Result<(), AlertError> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.failing {
            Err(AlertError::Http(HttpError::Timeout))
        } else {
            Ok(())
        }
    }
}

/// Status reporter that records every reported status.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<ServiceStatus>>>,
    failing: bool,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn reports(&self) -> Vec<ServiceStatus> {
        self.reports.lock().unwrap().clone()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, status: ServiceStatus) -> Result<(), ServiceError> {
        self.reports.lock().unwrap().push(status);
        if self.failing {
            Err(ServiceError::Report("supervisor unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}
