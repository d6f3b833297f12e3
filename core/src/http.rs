//! HTTP plumbing for the Connect transport: plain-data request/response
//! types and the pluggable executor boundary.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe one round trip as plain data,
//! so the transport can build and interpret them without touching the
//! network. The `HttpExecutor` implementation is the only place real I/O
//! happens — swapping it for a scripted one turns every client test into a
//! pure function check.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be captured
//! and replayed by test executors without lifetime concerns.

use std::fmt;

/// A Connect-style RPC request described as plain data.
///
/// Connect addresses every remote method as an HTTP POST to
/// `{base_url}/{package.Service}/{Method}`, so no method field is carried.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body. `None` means the request is sent without a body.
    pub body: Option<String>,
}

/// The raw result of executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Failure of the HTTP call itself (DNS, connection refused, broken pipe).
/// No response was produced; the transport propagates this unmodified.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Executes HTTP requests on behalf of the transport.
///
/// This is the injectable fetch seam: production code uses `UreqExecutor`,
/// tests substitute a scripted implementation. Implementations must return
/// non-2xx responses as `Ok` — status interpretation belongs to the
/// transport, not the executor. It is also the composition point for
/// concerns the core deliberately omits (deadlines, retries): wrap an
/// executor rather than patching the transport.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default executor backed by a blocking ureq agent.
pub struct UreqExecutor {
    agent: ureq::Agent,
}

impl UreqExecutor {
    /// Build an executor whose agent reports 4xx/5xx as data rather than
    /// `Err`, leaving status interpretation to the transport.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpExecutor for UreqExecutor {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let result = match request.body {
            Some(body) => builder.send(body.as_bytes()),
            None => builder.send_empty(),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}
