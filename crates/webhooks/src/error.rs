//! Webhook verification error types.

use thiserror::Error;

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Error type for webhook verification.
///
/// Every variant fails closed: a payload is never handed to the caller
/// unless its signature checked out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The signature header is missing or malformed.
    #[error("invalid header")]
    InvalidHeader,

    /// The recomputed digest does not match the provided one.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// The body passed verification but is not a valid event envelope.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}
