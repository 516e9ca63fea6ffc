//! # Signalist Mailer
//!
//! Transactional email for Signalist: welcome emails, the daily news digest,
//! inactivity reminders and stock price alerts.
//!
//! - [`EmailDispatcher`]: one operation per email, each rendering a template
//!   and sending one message
//! - [`template`]: `{{token}}` substitution
//! - [`transport`]: the [`MailTransport`] trait with SMTP and console backends
//!
//! ## Example
//!
//! ```ignore
//! use signalist_mailer::{EmailDispatcher, Sender, SmtpConfig, SmtpMailTransport, WelcomeEmail};
//! use std::sync::Arc;
//!
//! let transport = SmtpMailTransport::new(SmtpConfig::new("alerts@gmail.com", "app-password"));
//! let dispatcher = EmailDispatcher::new(Arc::new(transport), Sender::new("alerts@gmail.com"));
//!
//! dispatcher
//!     .send_welcome_email(&WelcomeEmail {
//!         email: "ada@example.com".into(),
//!         name: "Ada".into(),
//!         intro: "<p>Thanks for signing up.</p>".into(),
//!     })
//!     .await?;
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod template;
pub mod templates;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use config::{Sender, SmtpConfig};
pub use dispatcher::{
    EmailDispatcher, InactiveUserEmail, NewsSummaryEmail, StockAlertEmail, WelcomeEmail,
};
pub use error::{MailError, Result};
pub use transport::{
    ConsoleMailTransport, MailTransport, Mailbox, OutgoingMail, SentMail, SmtpMailTransport,
};
