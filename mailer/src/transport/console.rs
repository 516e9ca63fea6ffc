//! Development transport that writes mail to the log instead of sending it.

use super::{MailTransport, OutgoingMail, SentMail, new_message_id};
use crate::error::Result;
use futures::future::BoxFuture;

/// Logs every message at `info` and reports success.
///
/// Used when SMTP credentials are not configured, so local runs exercise the
/// same code paths without a mail account.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMailTransport;

impl MailTransport for ConsoleMailTransport {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<SentMail>> {
        Box::pin(async move {
            let message_id = new_message_id(&mail.from.email);
            tracing::info!(
                from = %mail.from,
                to = %mail.to,
                subject = %mail.subject,
                message_id = %message_id,
                html_bytes = mail.html.len(),
                "Email captured by console transport"
            );
            tracing::debug!(text = %mail.text, "Email plain-text body");
            Ok(SentMail { message_id })
        })
    }

    fn verify(&self) -> BoxFuture<'_, Result<bool>> {
        Box::pin(async { Ok(true) })
    }
}
