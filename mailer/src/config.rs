//! Mail transport configuration.

/// Default SMTP relay (Gmail, STARTTLS on the submission port).
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Display name used on every outgoing email.
pub const DEFAULT_FROM_NAME: &str = "Signalist";

/// SMTP relay settings.
#[derive(Clone)]
pub struct SmtpConfig {
    /// SMTP server host name.
    pub host: String,

    /// SMTP server port.
    ///
    /// Default: 587 (STARTTLS)
    pub port: u16,

    /// Authentication user, also the sender address.
    pub username: String,

    /// Authentication secret (an app password for Gmail).
    pub password: String,
}

impl SmtpConfig {
    /// Create SMTP configuration for the default relay.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Set the relay host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the relay port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sender identity for outgoing mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Display name (e.g. "Signalist").
    pub name: String,

    /// Sender address. Empty when not configured.
    pub email: String,
}

impl Sender {
    /// Create a sender with the default display name.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_FROM_NAME.to_string(),
            email: email.into(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sender address, or `None` when it was left unset.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }
}
