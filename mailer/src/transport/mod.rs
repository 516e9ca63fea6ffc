//! Delivery backends.
//!
//! The dispatcher hands a fully rendered [`OutgoingMail`] to a
//! [`MailTransport`] and awaits the result. Transports do not retry.

use crate::error::Result;
use futures::future::BoxFuture;

pub mod console;
pub mod smtp;

pub use console::ConsoleMailTransport;
pub use smtp::SmtpMailTransport;

/// Display name and address of a mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name
    pub name: String,
    /// Address
    pub email: String,
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" <{}>", self.name, self.email)
    }
}

/// One email, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Sender
    pub from: Mailbox,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text alternative
    pub text: String,
    /// HTML body
    pub html: String,
}

/// Outcome of a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// Message-ID header value assigned to the email
    pub message_id: String,
}

/// Something that can deliver email.
///
/// Methods return boxed futures so the dispatcher can hold an
/// `Arc<dyn MailTransport>` chosen at startup.
pub trait MailTransport: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`](crate::MailError) if the message cannot be built
    /// or the server does not accept it.
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<SentMail>>;

    /// Check that the transport can reach and authenticate with its server.
    ///
    /// `Ok(false)` means the server answered but the connection check did not
    /// pass; `Err` means the check itself failed.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Transport`](crate::MailError::Transport) if the
    /// server could not be contacted.
    fn verify(&self) -> BoxFuture<'_, Result<bool>>;
}

/// Build a Message-ID for `sender`'s domain.
pub(crate) fn new_message_id(sender: &str) -> String {
    let domain = sender
        .rsplit_once('@')
        .map_or("signalist.local", |(_, domain)| domain);
    format!("<{}@{domain}>", uuid::Uuid::new_v4())
}
