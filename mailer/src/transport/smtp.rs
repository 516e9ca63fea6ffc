//! SMTP transport using Lettre.

use super::{MailTransport, Mailbox, OutgoingMail, SentMail, new_message_id};
use crate::config::SmtpConfig;
use crate::error::{MailError, Result};
use futures::future::BoxFuture;
use lettre::message::{Mailbox as LettreMailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// SMTP relay transport.
///
/// Connects with STARTTLS and authenticates with the configured credentials.
/// A fresh connection is built for every message; sends run on the blocking
/// thread pool.
///
/// # Examples
///
/// ```ignore
/// use signalist_mailer::{SmtpConfig, SmtpMailTransport};
///
/// let transport = SmtpMailTransport::new(SmtpConfig::new("alerts@gmail.com", "app-password"));
/// ```
#[derive(Clone)]
pub struct SmtpMailTransport {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl SmtpMailTransport {
    /// Create a transport from configuration.
    #[must_use]
    pub fn new(config: SmtpConfig) -> Self {
        Self {
            credentials: Credentials::new(config.username, config.password),
            host: config.host,
            port: config.port,
        }
    }

    /// Build SMTP transport for one connection.
    ///
    /// # Errors
    ///
    /// Returns error if the relay cannot be configured (e.g. invalid host for TLS).
    fn build_transport(&self) -> Result<SmtpTransport> {
        Ok(SmtpTransport::starttls_relay(&self.host)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }

    fn mailbox(mailbox: &Mailbox) -> Result<LettreMailbox> {
        let address = mailbox
            .email
            .parse()
            .map_err(|e| MailError::InvalidAddress {
                address: mailbox.email.clone(),
                reason: format!("{e}"),
            })?;
        Ok(LettreMailbox::new(Some(mailbox.name.clone()), address))
    }

    fn build_message(mail: OutgoingMail, message_id: &str) -> Result<Message> {
        let to: LettreMailbox = mail.to.parse().map_err(|e| MailError::InvalidAddress {
            address: mail.to.clone(),
            reason: format!("{e}"),
        })?;

        Message::builder()
            .from(Self::mailbox(&mail.from)?)
            .to(to)
            .subject(mail.subject)
            .message_id(Some(message_id.to_string()))
            .multipart(MultiPart::alternative_plain_html(mail.text, mail.html))
            .map_err(|e| MailError::Build(format!("{e}")))
    }
}

impl std::fmt::Debug for SmtpMailTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailTransport")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl MailTransport for SmtpMailTransport {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<SentMail>> {
        Box::pin(async move {
            let message_id = new_message_id(&mail.from.email);
            let email = Self::build_message(mail, &message_id)?;
            let mailer = self.build_transport()?;

            tokio::task::spawn_blocking(move || {
                mailer
                    .send(&email)
                    .map_err(|e| MailError::Transport(format!("{e}")))
            })
            .await
            .map_err(|e| MailError::TaskFailed(format!("{e}")))??;

            Ok(SentMail { message_id })
        })
    }

    fn verify(&self) -> BoxFuture<'_, Result<bool>> {
        Box::pin(async move {
            let mailer = self.build_transport()?;

            tokio::task::spawn_blocking(move || {
                mailer
                    .test_connection()
                    .map_err(|e| MailError::Transport(format!("{e}")))
            })
            .await
            .map_err(|e| MailError::TaskFailed(format!("{e}")))?
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mail(to: &str, from: &str) -> OutgoingMail {
        OutgoingMail {
            from: Mailbox {
                name: "Signalist".to_string(),
                email: from.to_string(),
            },
            to: to.to_string(),
            subject: "Welcome to Signalist - your stock market toolkit is ready!".to_string(),
            text: "Thanks for joining Signalist".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[test]
    fn builds_multipart_message_with_our_message_id() {
        let message =
            SmtpMailTransport::build_message(mail("ada@example.com", "alerts@example.com"), "<id-1@example.com>")
                .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Message-ID: <id-1@example.com>"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("Thanks for joining Signalist"));
        assert!(raw.contains("ada@example.com"));
    }

    #[test]
    fn rejects_invalid_recipient() {
        let err = SmtpMailTransport::build_message(mail("not-an-address", "alerts@example.com"), "<x@y>")
            .unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress { ref address, .. } if address == "not-an-address"));
    }

    #[test]
    fn rejects_invalid_sender() {
        let err = SmtpMailTransport::build_message(mail("ada@example.com", ""), "<x@y>").unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress { .. }));
    }

    #[test]
    fn debug_hides_credentials() {
        let transport = SmtpMailTransport::new(SmtpConfig::new("u@example.com", "hunter2"));
        assert!(!format!("{transport:?}").contains("hunter2"));
    }
}
