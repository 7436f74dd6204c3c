use thiserror::Error;

use crate::api::Method;

/// Error raised by the diary API client.
///
/// Every transport problem, whether the request never reached the server or the
/// server answered with a non-success status, collapses into `RequestFailed`.
/// The decode/encode variants only fire when a payload does not match the
/// declared data-transfer types.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Transport ────────────────────────────────────────────────────────────
    #[error("{method} {path} failed: {reason}")]
    RequestFailed {
        method: Method,
        path: String,
        reason: FailureReason,
    },

    // ── Payload shape ────────────────────────────────────────────────────────
    #[error("Could not decode response of {method} {path}: {source}")]
    Decode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode request body for {method} {path}: {source}")]
    Encode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a request failed. Only used for display; callers treat all of these
/// the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Status(u16),
    Network(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Status(code) => write!(f, "server answered {code}"),
            FailureReason::Network(message) => write!(f, "network error: {message}"),
        }
    }
}

impl ClientError {
    pub fn request_failed(method: Method, path: impl Into<String>, reason: FailureReason) -> Self {
        ClientError::RequestFailed { method, path: path.into(), reason }
    }

    pub fn is_request_failed(&self) -> bool {
        matches!(self, ClientError::RequestFailed { .. })
    }

    /// The method and path of the call that produced this error.
    pub fn call(&self) -> (Method, &str) {
        match self {
            ClientError::RequestFailed { method, path, .. }
            | ClientError::Decode { method, path, .. }
            | ClientError::Encode { method, path, .. } => (*method, path.as_str()),
        }
    }
}
