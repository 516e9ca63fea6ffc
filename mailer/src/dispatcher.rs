//! Email dispatcher: one operation per transactional email.
//!
//! Each operation renders its template, sends exactly one message through the
//! configured transport and waits for the result. Success is logged at `info`
//! and failure at `error`, once per call; the transport error is then
//! returned unchanged. There is no queue and no retry.

use crate::config::Sender;
use crate::error::{MailError, Result};
use crate::templates;
use crate::transport::{MailTransport, Mailbox, OutgoingMail, SentMail};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Dashboard link used when an inactivity reminder does not supply one.
pub const DEFAULT_DASHBOARD_URL: &str = "https://signalist-mauve.vercel.app/";

/// Unsubscribe link used when an inactivity reminder does not supply one.
pub const DEFAULT_UNSUBSCRIBE_URL: &str = "#";

/// Display name on the configuration-check email.
pub const DIAGNOSTIC_FROM_NAME: &str = "Signalist Test";

/// Subject of the configuration-check email.
pub const DIAGNOSTIC_SUBJECT: &str = "🧪 Signalist Email Test - Configuration Check";

/// Welcome email data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeEmail {
    /// Recipient
    pub email: String,
    /// Recipient's display name
    pub name: String,
    /// Personalised introduction (HTML)
    pub intro: String,
}

/// Daily news digest data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSummaryEmail {
    /// Recipient
    pub email: String,
    /// Human-readable date shown in the subject and header
    pub date: String,
    /// Digest body (HTML)
    pub news_content: String,
}

/// Inactivity reminder data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InactiveUserEmail {
    /// Recipient
    pub email: String,
    /// Recipient's display name
    pub name: String,
    /// Dashboard link, [`DEFAULT_DASHBOARD_URL`] when `None`
    pub dashboard_url: Option<String>,
    /// Unsubscribe link, [`DEFAULT_UNSUBSCRIBE_URL`] when `None`
    pub unsubscribe_url: Option<String>,
}

/// Price alert data, shared by the upper and lower alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAlertEmail {
    /// Recipient
    pub email: String,
    /// Ticker symbol
    pub symbol: String,
    /// Company name
    pub company: String,
    /// Price that triggered the alert, preformatted
    pub current_price: String,
    /// Target the user set, preformatted
    pub target_price: String,
    /// When the alert fired, preformatted
    pub timestamp: String,
}

/// Sends Signalist's transactional emails.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct EmailDispatcher {
    transport: Arc<dyn MailTransport>,
    sender: Sender,
}

impl std::fmt::Debug for EmailDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailDispatcher")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl EmailDispatcher {
    /// Create a dispatcher sending as `sender` through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn MailTransport>, sender: Sender) -> Self {
        Self { transport, sender }
    }

    /// Configured sender identity.
    #[must_use]
    pub const fn sender(&self) -> &Sender {
        &self.sender
    }

    /// Welcome a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`MailError`] unchanged.
    pub async fn send_welcome_email(&self, data: &WelcomeEmail) -> Result<SentMail> {
        let html = templates::WELCOME.render(&[
            ("name", data.name.as_str()),
            ("intro", data.intro.as_str()),
        ]);
        let mail = self.compose(
            &data.email,
            "Welcome to Signalist - your stock market toolkit is ready!".to_string(),
            "Thanks for joining Signalist".to_string(),
            html,
        );
        self.deliver("welcome", mail).await
    }

    /// Send the daily market news digest.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`MailError`] unchanged.
    pub async fn send_news_summary_email(&self, data: &NewsSummaryEmail) -> Result<SentMail> {
        let html = templates::NEWS_SUMMARY.render(&[
            ("date", data.date.as_str()),
            ("newsContent", data.news_content.as_str()),
        ]);
        let mail = self.compose(
            &data.email,
            format!("📈 Market News Summary Today - {}", data.date),
            "Today's market news summary from Signalist".to_string(),
            html,
        );
        self.deliver("news_summary", mail).await
    }

    /// Remind an inactive user what they are missing.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`MailError`] unchanged.
    pub async fn send_inactive_user_email(&self, data: &InactiveUserEmail) -> Result<SentMail> {
        let dashboard_url = data
            .dashboard_url
            .as_deref()
            .unwrap_or(DEFAULT_DASHBOARD_URL);
        let unsubscribe_url = data
            .unsubscribe_url
            .as_deref()
            .unwrap_or(DEFAULT_UNSUBSCRIBE_URL);

        let html = templates::INACTIVE_USER_REMINDER.render(&[
            ("name", data.name.as_str()),
            ("dashboardUrl", dashboard_url),
            ("unsubscribeUrl", unsubscribe_url),
        ]);
        let mail = self.compose(
            &data.email,
            format!("{}, opportunities are waiting for you", data.name),
            format!(
                "Hi {}, we miss you at Signalist! Your market opportunities are waiting.",
                data.name
            ),
            html,
        );
        self.deliver("inactive_user_reminder", mail).await
    }

    /// Alert that a price rose above its target.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`MailError`] unchanged.
    pub async fn send_stock_alert_upper_email(&self, data: &StockAlertEmail) -> Result<SentMail> {
        let html = templates::STOCK_ALERT_UPPER.render(&Self::alert_values(data));
        let mail = self.compose(
            &data.email,
            format!("📈 Price Above: {} hit {}", data.symbol, data.target_price),
            format!(
                "{} is above {}. Current: {}",
                data.symbol, data.target_price, data.current_price
            ),
            html,
        );
        self.deliver("stock_alert_upper", mail).await
    }

    /// Alert that a price fell below its target.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`MailError`] unchanged.
    pub async fn send_stock_alert_lower_email(&self, data: &StockAlertEmail) -> Result<SentMail> {
        let html = templates::STOCK_ALERT_LOWER.render(&Self::alert_values(data));
        let mail = self.compose(
            &data.email,
            format!("📉 Price Below: {} hit {}", data.symbol, data.target_price),
            format!(
                "{} is below {}. Current: {}",
                data.symbol, data.target_price, data.current_price
            ),
            html,
        );
        self.deliver("stock_alert_lower", mail).await
    }

    /// Send a configuration-check email from the sender to itself.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::NotConfigured`] when no sender address is set,
    /// otherwise the transport's error unchanged.
    pub async fn send_diagnostic_email(&self, sent_at: DateTime<Utc>) -> Result<SentMail> {
        let address = self
            .sender
            .address()
            .ok_or_else(|| MailError::NotConfigured("sender address is not set".to_string()))?
            .to_string();

        let html = format!(
            "<h2>✅ Signalist Email System Test</h2>\n\
             <p>The mail transport is configured correctly!</p>\n\
             <p><strong>Time:</strong> {}</p>\n\
             <p>You can now safely delete this test email.</p>",
            sent_at.to_rfc3339()
        );

        let mail = OutgoingMail {
            from: Mailbox {
                name: DIAGNOSTIC_FROM_NAME.to_string(),
                email: address.clone(),
            },
            to: address,
            subject: DIAGNOSTIC_SUBJECT.to_string(),
            text: "If you received this email, nodemailer is working correctly!".to_string(),
            html,
        };
        self.deliver("diagnostic", mail).await
    }

    /// Check the transport can reach its server.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`MailError`] if the check could not be performed.
    pub async fn verify(&self) -> Result<bool> {
        self.transport.verify().await
    }

    fn alert_values(data: &StockAlertEmail) -> [(&str, &str); 5] {
        [
            ("symbol", data.symbol.as_str()),
            ("company", data.company.as_str()),
            ("currentPrice", data.current_price.as_str()),
            ("targetPrice", data.target_price.as_str()),
            ("timestamp", data.timestamp.as_str()),
        ]
    }

    fn compose(&self, to: &str, subject: String, text: String, html: String) -> OutgoingMail {
        OutgoingMail {
            from: Mailbox {
                name: self.sender.name.clone(),
                email: self.sender.email.clone(),
            },
            to: to.to_string(),
            subject,
            text,
            html,
        }
    }

    async fn deliver(&self, kind: &'static str, mail: OutgoingMail) -> Result<SentMail> {
        let to = mail.to.clone();
        match self.transport.send(mail).await {
            Ok(sent) => {
                tracing::info!(kind, to = %to, message_id = %sent.message_id, "Email sent");
                Ok(sent)
            },
            Err(error) => {
                tracing::error!(kind, to = %to, error = %error, "Failed to send email");
                Err(error)
            },
        }
    }
}
