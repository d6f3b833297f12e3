//! Shared Connect transport: one POST, one decoded response.
//!
//! # Design
//! All four service clients funnel through `Transport::invoke`; they add
//! only wire↔domain mapping on top. Response decoding is lenient by
//! contract: a 2xx body that fails to parse is treated as an empty object
//! (`Resp::default()`), never an error — the protocol tolerates bodies
//! that legitimately carry no payload, e.g. `Logout`. Non-success
//! responses are normalized into `ApiError::Rpc` with defaults for
//! whatever the server omitted.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpExecutor, HttpRequest, UreqExecutor};

/// Server address used when `ClientOptions::base_url` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Construction options shared by all service clients.
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Base URL of the Connect-enabled API server. Defaults to
    /// [`DEFAULT_BASE_URL`]; a trailing slash is stripped.
    pub base_url: Option<String>,
    /// Custom HTTP executor (useful for tests). Defaults to
    /// [`UreqExecutor`].
    pub http: Option<Arc<dyn HttpExecutor>>,
}

/// Connect error body: `{code?, message?, details?}`. Details are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConnectErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Body placeholder for methods whose request carries no fields
/// (serializes as `{}`, which is still sent — only a `None` body is
/// omitted from the request).
#[derive(Serialize)]
pub(crate) struct EmptyBody {}

/// Stateless Connect transport owned by each service client: a base URL
/// plus an executor, nothing else.
#[derive(Clone)]
pub(crate) struct Transport {
    base_url: String,
    http: Arc<dyn HttpExecutor>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(options: ClientOptions) -> Self {
        let base_url = options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: options
                .http
                .unwrap_or_else(|| Arc::new(UreqExecutor::new())),
        }
    }

    /// Perform one `POST {base_url}/{path}` and decode the response.
    ///
    /// A bearer header is attached only when `access_token` is supplied;
    /// the body is omitted from the request only when `body` is `None`.
    pub(crate) fn invoke<Req, Resp>(
        &self,
        path: &str,
        body: Option<&Req>,
        access_token: Option<&str>,
    ) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: DeserializeOwned + Default,
    {
        let path = path.strip_prefix('/').unwrap_or(path);
        let url = format!("{}/{}", self.base_url, path);

        let mut headers = vec![(
            "content-type".to_string(),
            "application/json".to_string(),
        )];
        if let Some(token) = access_token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }

        let body = match body {
            Some(value) => Some(
                serde_json::to_string(value)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?,
            ),
            None => None,
        };

        let response = self
            .http
            .execute(HttpRequest { url, headers, body })
            .map_err(ApiError::Transport)?;

        if !(200..300).contains(&response.status) {
            let error: ConnectErrorBody =
                serde_json::from_str(&response.body).unwrap_or_default();
            return Err(ApiError::Rpc {
                message: error.message.unwrap_or_else(|| {
                    format!("Request failed with status {}", response.status)
                }),
                code: error.code.unwrap_or_else(|| "unknown".to_string()),
                status: response.status,
            });
        }

        Ok(serde_json::from_str(&response.body).unwrap_or_default())
    }
}
