//! Client error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for client operations.
///
/// The client never retries: every failure is surfaced to the immediate
/// caller. HTTP status codes alone are not errors; only the envelope's
/// `error` object produces [`Error::Api`].
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: DNS, connect, TLS, timeout, or a request
    /// that was aborted before a response completed. The underlying cause
    /// chain is preserved.
    #[error("transport error")]
    Transport(#[from] reqwest::Error),

    /// A well-formed error envelope returned by the API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body could not be decoded into the expected shape.
    #[error("http {status}: failed to decode response")]
    Decode {
        /// HTTP status of the response.
        status: u16,
        /// The raw body, kept for diagnosis.
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request body failed to serialize.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    /// Invalid configuration or request construction input.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// True when the failure was a transport timeout (including a
    /// caller-supplied deadline on the underlying HTTP client).
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }

    /// True when the failure happened while establishing a connection.
    pub fn is_connect(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_connect())
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

/// Error category reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorType {
    /// The request was rejected as invalid.
    #[serde(rename = "request_error")]
    RequestError,
    /// The API itself failed.
    #[serde(rename = "api_error")]
    ApiError,
}

/// An error envelope returned by the API, enriched with the request that
/// produced it.
#[derive(Debug, Clone, Deserialize, Error)]
#[error("[{method} {path}] HTTP {status} '{code}': {detail}")]
pub struct ApiError {
    /// Error category.
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable detail.
    pub detail: String,
    /// Link to the documentation for this error.
    #[serde(default)]
    pub documentation_url: String,

    // Request context, filled in by the transport.
    #[serde(skip)]
    pub method: String,
    #[serde(skip)]
    pub path: String,
    #[serde(skip)]
    pub status: u16,
}
