//! Error type shared by every service client.
//!
//! # Design
//! `Rpc` carries the server's machine-readable `code` because callers
//! branch on it — a `"not_found"` from `get_my_profile` means "no profile
//! exists yet", not a fault. Transport failures pass through unmodified;
//! no client method catches or retries.

use std::fmt;

use crate::http::TransportError;

/// Errors returned by the Brigade service clients.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a non-success status. `message` and `code`
    /// come from the Connect error body; a body that omits them yields
    /// `"Request failed with status N"` and `"unknown"`.
    Rpc {
        message: String,
        code: String,
        status: u16,
    },

    /// The HTTP call itself failed before any response was produced.
    Transport(TransportError),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl ApiError {
    /// Machine-readable error code, when the failure was an RPC error.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Rpc { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status, when the failure was an RPC error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rpc { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Rpc {
                message,
                code,
                status,
            } => write!(f, "{message} (code: {code}, status: {status})"),
            ApiError::Transport(err) => write!(f, "{err}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_exposes_code_and_status() {
        let err = ApiError::Rpc {
            message: "no profile".to_string(),
            code: "not_found".to_string(),
            status: 404,
        };
        assert_eq!(err.code(), Some("not_found"));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "no profile (code: not_found, status: 404)");
    }

    #[test]
    fn transport_error_has_no_code_or_status() {
        let err = ApiError::Transport(TransportError("connection refused".to_string()));
        assert_eq!(err.code(), None);
        assert_eq!(err.status(), None);
    }
}
