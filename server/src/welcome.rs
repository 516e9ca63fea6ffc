//! Welcome email trigger.
//!
//! Subscribes to `app/user.created` on the in-process bus and sends each new
//! user a welcome email whose introduction is built from their profile
//! answers. A failed send is logged and the next event is handled as usual.

use futures::StreamExt;
use signalist_auth::UserCreated;
use signalist_core::event_bus::{EventBus, EventBusError, EventStream};
use signalist_mailer::{EmailDispatcher, WelcomeEmail};
use tokio::task::JoinHandle;

/// Subscribe to sign-ups and spawn the task sending welcome emails.
///
/// The subscription is in place when this returns, so events published
/// afterwards are not missed.
///
/// # Errors
///
/// Returns [`EventBusError::SubscriptionFailed`] if the bus refuses the
/// subscription.
pub async fn spawn_welcome_emails(
    bus: &dyn EventBus,
    mailer: EmailDispatcher,
) -> Result<JoinHandle<()>, EventBusError> {
    let stream = bus.subscribe(&[UserCreated::NAME]).await?;
    tracing::info!(event = UserCreated::NAME, "Welcome email subscriber started");
    Ok(tokio::spawn(run(stream, mailer)))
}

async fn run(mut stream: EventStream, mailer: EmailDispatcher) {
    while let Some(next) = stream.next().await {
        let envelope = match next {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(%error, "Event stream error");
                continue;
            },
        };

        let user: UserCreated = match envelope.decode(UserCreated::NAME) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "Skipping malformed user.created event");
                continue;
            },
        };

        let email = WelcomeEmail {
            email: user.email.clone(),
            name: escape_html(&user.name),
            intro: personalised_intro(&user),
        };

        // The dispatcher logs the outcome.
        if let Err(error) = mailer.send_welcome_email(&email).await {
            tracing::debug!(%error, "Continuing after failed welcome email");
        }
    }

    tracing::info!("Welcome email subscriber stopped");
}

/// Introduction paragraph for the welcome email.
#[must_use]
pub fn personalised_intro(user: &UserCreated) -> String {
    format!(
        "<p class=\"mobile-text\" style=\"margin: 0 0 30px 0; font-size: 16px; line-height: 1.6; color: #CCDADC;\">\
         Thanks for joining Signalist! You told us you're investing from {country} with a focus on \
         <strong>{goals}</strong> and a <strong>{risk}</strong> risk tolerance, so we'll keep \
         {industry} opportunities front and center while you set up your watchlist and alerts.</p>",
        country = escape_html(&user.country),
        goals = escape_html(&user.investment_goals.to_lowercase()),
        risk = escape_html(&user.risk_tolerance.to_lowercase()),
        industry = escape_html(&user.preferred_industry),
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
