//! Error types for email delivery.

use thiserror::Error;

/// Result type alias for mailer operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Failures while composing or delivering an email.
///
/// Dispatcher operations return these unchanged so callers can decide
/// whether a failed send matters to them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress {
        /// The address as given
        address: String,
        /// Parser message
        reason: String,
    },

    /// The message could not be assembled.
    #[error("Failed to build email: {0}")]
    Build(String),

    /// The SMTP server rejected the message or could not be reached.
    #[error("Failed to send email: {0}")]
    Transport(String),

    /// The blocking send task panicked or was cancelled.
    #[error("Email task failed: {0}")]
    TaskFailed(String),

    /// Required mail settings are missing.
    #[error("Mailer not configured: {0}")]
    NotConfigured(String),
}

impl MailError {
    /// Returns `true` if fixing the configuration (not retrying) is the remedy.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signalist_mailer::MailError;
    /// assert!(MailError::NotConfigured("NODEMAILER_EMAIL".into()).is_configuration_issue());
    /// assert!(!MailError::Transport("timed out".into()).is_configuration_issue());
    /// ```
    pub const fn is_configuration_issue(&self) -> bool {
        matches!(self, Self::NotConfigured(_) | Self::InvalidAddress { .. })
    }
}
