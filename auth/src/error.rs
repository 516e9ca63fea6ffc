//! Error types for provider calls.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failures talking to the authentication provider.
///
/// These never reach the user directly: reducers turn them into one of a few
/// fixed [`ActionResult`](crate::ActionResult) messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Provider Errors
    // ═══════════════════════════════════════════════════════════
    /// The provider answered with a non-success status.
    #[error("Provider rejected request ({status}): {message}")]
    Provider {
        /// HTTP status code
        status: u16,
        /// Machine-readable code from the body, e.g. `USER_ALREADY_EXISTS`
        code: Option<String>,
        /// Human-readable message from the body
        message: String,
    },

    /// The provider answered 2xx with a body we could not read.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════════════════════
    // Infrastructure Errors
    // ═══════════════════════════════════════════════════════════
    /// Network failure reaching the provider.
    #[error("Provider unreachable: {0}")]
    Transport(String),

    /// Internal error (e.g. a poisoned lock in a mock).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Structured error code reported by the provider, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Message used when classifying this error.
    ///
    /// For provider rejections this is the provider's own message; for
    /// everything else the full display string.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Provider { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
