//! Diagnostic endpoints for checking mail and event wiring by hand.
//!
//! - `GET /api/test-email` sends a configuration-check email to the sender
//!   address
//! - `POST /api/test-signup` publishes a fixed `app/user.created` event
//! - `GET /api/test-signup` describes the above
//!
//! There is no auth guard. The router is only mounted when
//! `DIAGNOSTICS_ENABLED` is set.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use signalist_auth::UserCreated;
use signalist_core::environment::Clock;
use signalist_core::event::EventEnvelope;
use signalist_core::event_bus::EventPublisher;
use signalist_mailer::{EmailDispatcher, MailError};
use std::sync::Arc;

const TEST_EMAIL_ADVICE: &str =
    "If the error is \"Invalid login\", regenerate your Google App Password";

const TEST_SIGNUP_ADVICE: &str =
    "Check your event bus configuration and ensure the event handler is properly registered";

/// Collaborators the diagnostic endpoints exercise.
#[derive(Clone)]
pub struct Diagnostics {
    mailer: EmailDispatcher,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("mailer", &self.mailer)
            .finish_non_exhaustive()
    }
}

impl Diagnostics {
    /// Create the diagnostic surface.
    #[must_use]
    pub fn new(
        mailer: EmailDispatcher,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            mailer,
            events,
            clock,
        }
    }
}

/// Router for the diagnostic endpoints, relative to `/api`.
pub fn diagnostics_router(diagnostics: Diagnostics) -> Router {
    Router::new()
        .route("/test-email", get(test_email))
        .route("/test-signup", get(test_signup_usage).post(test_signup))
        .with_state(diagnostics)
}

/// Known mail failure causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    /// The relay rejected the username or password.
    InvalidCredentials,
    /// The relay refused the connection.
    ConnectionRefused,
    /// The relay's host name did not resolve.
    HostNotFound,
}

const DIAGNOSES: &[(Diagnosis, &[&str])] = &[
    (
        Diagnosis::InvalidCredentials,
        &["Invalid login", "535", "Username and Password not accepted"],
    ),
    (
        Diagnosis::ConnectionRefused,
        &["ECONNREFUSED", "Connection refused"],
    ),
    (
        Diagnosis::HostNotFound,
        &["ENOTFOUND", "failed to lookup address", "Name or service not known"],
    ),
];

impl Diagnosis {
    /// Line appended to the error message.
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::InvalidCredentials => {
                "\n❌ Invalid credentials. Check your app password is correct."
            },
            Self::ConnectionRefused => {
                "\n❌ Connection refused. Check your internet connection or Gmail SMTP settings."
            },
            Self::HostNotFound => "\n❌ Cannot reach Gmail server. Check your network connection.",
        }
    }
}

/// Match a mail error message against the known failure causes.
#[must_use]
pub fn diagnose(message: &str) -> Option<Diagnosis> {
    DIAGNOSES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| message.contains(needle)))
        .map(|(diagnosis, _)| *diagnosis)
}

#[derive(Debug, Serialize)]
struct Failure {
    success: bool,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<&'static str>,
}

impl Failure {
    const fn new(error: &'static str) -> Self {
        Self {
            success: false,
            error,
            message: None,
            details: None,
            advice: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TestEmailSent {
    success: bool,
    message: &'static str,
    message_id: String,
    test_email: String,
    details: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TestSignupSent {
    success: bool,
    message: &'static str,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<String>,
}

fn email_failure(error: &MailError) -> Response {
    let message = error.to_string();
    let guidance = diagnose(&message).map_or("", Diagnosis::guidance);

    tracing::error!(%error, "Email test failed");

    let body = Failure {
        message: Some(format!("{message}{guidance}")),
        advice: Some(TEST_EMAIL_ADVICE),
        ..Failure::new("Email test failed")
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Send a configuration-check email to the sender address.
///
/// ```text
/// GET /api/test-email
/// ```
///
/// | Outcome | Status |
/// |---------|--------|
/// | sent | 200 `{success, message, messageId, testEmail, details}` |
/// | no sender address | 400 |
/// | transport check did not pass | 500 `"Transporter verification failed"` |
/// | any other failure | 500 `"Email test failed"` with guidance |
pub async fn test_email(State(diagnostics): State<Diagnostics>) -> Response {
    let Some(test_email) = diagnostics.mailer.sender().address().map(str::to_string) else {
        tracing::warn!("Email test requested without a sender address");
        return (
            StatusCode::BAD_REQUEST,
            Json(Failure::new(
                "NODEMAILER_EMAIL environment variable is not set",
            )),
        )
            .into_response();
    };

    tracing::info!(sender = %test_email, "Testing mail configuration");

    match diagnostics.mailer.verify().await {
        Ok(true) => {},
        Ok(false) => {
            tracing::error!("Mail transport verification failed");
            let body = Failure {
                details: Some("Connection to the SMTP server could not be established"),
                ..Failure::new("Transporter verification failed")
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        },
        Err(error) => return email_failure(&error),
    }

    match diagnostics
        .mailer
        .send_diagnostic_email(diagnostics.clock.now())
        .await
    {
        Ok(sent) => (
            StatusCode::OK,
            Json(TestEmailSent {
                success: true,
                message: "Test email sent successfully",
                message_id: sent.message_id,
                test_email,
                details: "Check your inbox for a test email. If you received it, nodemailer is working!",
            }),
        )
            .into_response(),
        Err(error) => email_failure(&error),
    }
}

/// The event `POST /api/test-signup` publishes.
#[must_use]
pub fn test_signup_event() -> UserCreated {
    UserCreated {
        email: "test.user@example.com".to_string(),
        name: "Test User".to_string(),
        country: "United States".to_string(),
        investment_goals: "Long-term growth".to_string(),
        risk_tolerance: "Moderate".to_string(),
        preferred_industry: "Technology".to_string(),
    }
}

/// Publish a fixed `app/user.created` event.
///
/// ```text
/// POST /api/test-signup
/// ```
pub async fn test_signup(State(diagnostics): State<Diagnostics>) -> Response {
    let event = test_signup_event();
    tracing::info!(email = %event.email, "Publishing test signup event");

    let published = match EventEnvelope::from_event(&event, diagnostics.clock.now().timestamp_millis()) {
        Ok(envelope) => diagnostics
            .events
            .publish(envelope)
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match published {
        Ok(receipt) => {
            tracing::info!(event_id = ?receipt.first_id(), "Test signup event published");
            (
                StatusCode::OK,
                Json(TestSignupSent {
                    success: true,
                    message: "Test signup event triggered",
                    details: format!(
                        "Event sent for {}. Check the Inngest dashboard at http://localhost:8288 and email server logs.",
                        event.email
                    ),
                    event_id: receipt.first_id().map(str::to_string),
                }),
            )
                .into_response()
        },
        Err(message) => {
            tracing::error!(error = %message, "Test signup event failed");
            let body = Failure {
                message: Some(message),
                advice: Some(TEST_SIGNUP_ADVICE),
                ..Failure::new("Test signup event failed")
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        },
    }
}

/// Usage notes for `POST /api/test-signup`.
#[allow(clippy::unused_async)]
pub async fn test_signup_usage() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "info": "Test Signup Endpoint",
        "method": "POST",
        "body": "Empty (uses hardcoded test data)",
        "description": "Triggers the app/user.created event to test the welcome email flow",
        "usage": "curl -X POST http://localhost:8080/api/test-signup",
        "note": "Monitor the server console and event dashboard for logs"
    }))
}
