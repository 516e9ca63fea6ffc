//! End-to-end behaviour of the composed router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use signalist_auth::mocks::MockAuthProvider;
use signalist_auth::{AuthApi, AuthEnvironment, AuthReducer, AuthState, UserCreated};
use signalist_core::event_bus::EventPublisher;
use signalist_mailer::mocks::MockMailTransport;
use signalist_mailer::{EmailDispatcher, MailError, Sender};
use signalist_runtime::Store;
use signalist_server::welcome::spawn_welcome_emails;
use signalist_server::{Diagnostics, build_router};
use signalist_testing::mocks::{FailingEventPublisher, InMemoryEventBus};
use signalist_testing::test_clock;
use signalist_web::CORRELATION_ID_HEADER;
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    server: TestServer,
    transport: MockMailTransport,
    bus: InMemoryEventBus,
}

fn mailer(transport: &MockMailTransport, sender: &str) -> EmailDispatcher {
    EmailDispatcher::new(Arc::new(transport.clone()), Sender::new(sender))
}

fn harness_with(
    sender: &str,
    events: Option<Arc<dyn EventPublisher>>,
    diagnostics_enabled: bool,
) -> Harness {
    let transport = MockMailTransport::new();
    let bus = InMemoryEventBus::new();
    let events = events.unwrap_or_else(|| Arc::new(bus.clone()));

    let env = AuthEnvironment::new(
        MockAuthProvider::new(),
        Arc::clone(&events),
        Arc::new(test_clock()),
    );
    let store = Arc::new(Store::new(AuthState::default(), AuthReducer::new(), env));
    let api = AuthApi::new(store).with_timeout(Duration::from_secs(2));

    let diagnostics = diagnostics_enabled.then(|| {
        Diagnostics::new(mailer(&transport, sender), events, Arc::new(test_clock()))
    });

    Harness {
        server: TestServer::new(build_router(api, diagnostics)).unwrap(),
        transport,
        bus,
    }
}

fn harness() -> Harness {
    harness_with("alerts@example.com", None, true)
}

#[tokio::test]
async fn health_is_ok_and_echoes_correlation_id() {
    let h = harness();

    let response = h.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
    assert!(response.headers().get(CORRELATION_ID_HEADER).is_some());

    let ready = h.server.get("/health/ready").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn diagnostics_are_absent_unless_enabled() {
    let h = harness_with("alerts@example.com", None, false);

    let response = h.server.get("/api/test-email").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_email_sends_to_sender() {
    let h = harness();

    let response = h.server.get("/api/test-email").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Test email sent successfully");
    assert_eq!(body["testEmail"], "alerts@example.com");
    assert!(!body["messageId"].as_str().unwrap().is_empty());

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alerts@example.com");
    assert_eq!(sent[0].subject, "🧪 Signalist Email Test - Configuration Check");
}

#[tokio::test]
async fn test_email_without_sender_is_400() {
    let h = harness_with("", None, true);

    let response = h.server.get("/api/test-email").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "error": "NODEMAILER_EMAIL environment variable is not set"
        })
    );
}

#[tokio::test]
async fn test_email_failed_verification_is_500() {
    let h = harness();
    h.transport.set_verify_result(Ok(false));

    let response = h.server.get("/api/test-email").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Transporter verification failed"
    );
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_email_failure_carries_guidance() {
    let h = harness();
    h.transport.fail_with(MailError::Transport(
        "535-5.7.8 Username and Password not accepted".to_string(),
    ));

    let response = h.server.get("/api/test-email").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Email test failed");
    assert_eq!(
        body["message"],
        "Failed to send email: 535-5.7.8 Username and Password not accepted\n❌ Invalid credentials. Check your app password is correct."
    );
    assert_eq!(
        body["advice"],
        "If the error is \"Invalid login\", regenerate your Google App Password"
    );
}

#[tokio::test]
async fn test_signup_publishes_fixed_event() {
    let h = harness();

    let response = h.server.post("/api/test-signup").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Test signup event triggered");
    assert_eq!(body["eventId"], "evt-1");

    let published = h.bus.published_named(UserCreated::NAME);
    assert_eq!(published.len(), 1);
    assert_eq!(
        published[0].data,
        json!({
            "email": "test.user@example.com",
            "name": "Test User",
            "country": "United States",
            "investmentGoals": "Long-term growth",
            "riskTolerance": "Moderate",
            "preferredIndustry": "Technology"
        })
    );
}

#[tokio::test]
async fn test_signup_failure_is_500() {
    let h = harness_with(
        "alerts@example.com",
        Some(Arc::new(FailingEventPublisher::new())),
        true,
    );

    let response = h.server.post("/api/test-signup").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Test signup event failed");
    assert!(body["message"].as_str().unwrap().contains("app/user.created"));
}

#[tokio::test]
async fn test_signup_usage() {
    let h = harness();

    let response = h.server.get("/api/test-signup").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["method"], "POST");
}

#[tokio::test]
async fn sign_up_triggers_welcome_email() {
    let h = harness();
    let welcome_transport = MockMailTransport::new();
    let handle = spawn_welcome_emails(&h.bus, mailer(&welcome_transport, "alerts@example.com"))
        .await
        .unwrap();

    let response = h
        .server
        .post("/api/auth/sign-up")
        .json(&json!({
            "email": "ada@example.com",
            "password": "correct horse battery",
            "fullName": "Ada Lovelace",
            "country": "United Kingdom",
            "investmentGoals": "Growth",
            "riskTolerance": "High",
            "preferredIndustry": "Technology"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["success"], true);

    for _ in 0..50 {
        if !welcome_transport.sent().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let sent = welcome_transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(
        sent[0].subject,
        "Welcome to Signalist - your stock market toolkit is ready!"
    );
    assert!(sent[0].html.contains("United Kingdom"));
    handle.abort();
}
