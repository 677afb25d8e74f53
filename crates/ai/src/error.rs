//! Chat relay error types.

use thiserror::Error;

/// Errors produced by the chat relay.
///
/// Individual malformed stream lines are not errors: the relay logs and
/// skips them, since providers may interleave keep-alive or partial lines.
#[derive(Debug, Error)]
pub enum AiError {
    /// Invalid input or request.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Upstream provider rejected the request or could not be reached.
    /// `status` is present when the provider answered with a non-2xx code.
    #[error("Provider error: {detail}")]
    Provider { status: Option<u16>, detail: String },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a provider error without an HTTP status (network failure).
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            detail: msg.into(),
        }
    }
}
