//! Configuration management for the server.
//!
//! Loads configuration from environment variables (a `.env` file is read by
//! the binary first) with defaults suitable for local development.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `REQUEST_TIMEOUT_SECS` | `10` |
//! | `SHUTDOWN_TIMEOUT_SECS` | `30` |
//! | `ACTION_BUFFER` | `256` |
//! | `AUTH_BASE_URL` | `http://localhost:3000/api/auth` |
//! | `NODEMAILER_EMAIL` | unset |
//! | `NODEMAILER_PASSWORD` | unset (console transport) |
//! | `SMTP_HOST` | `smtp.gmail.com` |
//! | `SMTP_PORT` | `587` |
//! | `INNGEST_EVENT_KEY` | unset (in-process bus) |
//! | `INNGEST_BASE_URL` | `https://inn.gs` |
//! | `DIAGNOSTICS_ENABLED` | `false` |

use signalist_auth::providers::http::DEFAULT_BASE_URL as DEFAULT_AUTH_BASE_URL;
use signalist_inngest::DEFAULT_BASE_URL as DEFAULT_EVENTS_BASE_URL;
use signalist_mailer::config::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Value as found
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Authentication provider configuration
    pub auth: AuthConfig,
    /// Mail transport configuration
    pub mail: MailConfig,
    /// Event bus configuration
    pub events: EventsConfig,
    /// Diagnostic endpoint configuration
    pub diagnostics: DiagnosticsConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// How long a handler waits for its terminal action
    pub request_timeout: Duration,
    /// How long shutdown waits for running effects
    pub shutdown_timeout: Duration,
    /// Effect-produced actions buffered for waiting requests
    pub action_buffer: usize,
}

/// Authentication provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Provider API base URL
    pub base_url: String,
}

/// Mail configuration
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// Sender address, also the SMTP user
    pub sender_email: Option<String>,
    /// SMTP password; without it mail goes to the console transport
    pub password: Option<String>,
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender_email", &self.sender_email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl MailConfig {
    /// Whether both SMTP credentials are present.
    #[must_use]
    pub const fn has_smtp_credentials(&self) -> bool {
        self.sender_email.is_some() && self.password.is_some()
    }
}

/// Event bus configuration
#[derive(Clone, PartialEq, Eq)]
pub struct EventsConfig {
    /// Hosted event API key; without it events stay in-process
    pub event_key: Option<String>,
    /// Hosted event API base URL
    pub base_url: String,
}

impl std::fmt::Debug for EventsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsConfig")
            .field("event_key", &self.event_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Diagnostic endpoint configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Mount `/api/test-email` and `/api/test-signup`
    pub enabled: bool,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric or boolean variable
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric or boolean variable
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse(&var, "PORT", 8080)?,
                request_timeout: Duration::from_secs(parse(&var, "REQUEST_TIMEOUT_SECS", 10)?),
                shutdown_timeout: Duration::from_secs(parse(&var, "SHUTDOWN_TIMEOUT_SECS", 30)?),
                action_buffer: parse(&var, "ACTION_BUFFER", 256)?,
            },
            auth: AuthConfig {
                base_url: var("AUTH_BASE_URL").unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string()),
            },
            mail: MailConfig {
                sender_email: var("NODEMAILER_EMAIL"),
                password: var("NODEMAILER_PASSWORD"),
                smtp_host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                smtp_port: parse(&var, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
            },
            events: EventsConfig {
                event_key: var("INNGEST_EVENT_KEY"),
                base_url: var("INNGEST_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_EVENTS_BASE_URL.to_string()),
            },
            diagnostics: DiagnosticsConfig {
                enabled: parse(&var, "DIAGNOSTICS_ENABLED", false)?,
            },
        })
    }
}

fn parse<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
