//! A failed welcome email is reported once, by the dispatcher.

#![allow(clippy::unwrap_used)]

use signalist_auth::UserCreated;
use signalist_core::event::EventEnvelope;
use signalist_core::event_bus::EventPublisher;
use signalist_mailer::mocks::MockMailTransport;
use signalist_mailer::{EmailDispatcher, MailError, Sender};
use signalist_server::LocalEventBus;
use signalist_server::welcome::spawn_welcome_emails;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

#[derive(Clone, Default)]
struct ProblemCounter {
    errors: Arc<AtomicUsize>,
    warnings: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for ProblemCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        match *event.metadata().level() {
            Level::ERROR => {
                self.errors.fetch_add(1, Ordering::SeqCst);
            },
            Level::WARN => {
                self.warnings.fetch_add(1, Ordering::SeqCst);
            },
            _ => {},
        }
    }
}

#[tokio::test]
async fn failed_welcome_email_logs_one_problem() {
    let counter = ProblemCounter::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(counter.clone()));

    let bus = LocalEventBus::new();
    let transport =
        MockMailTransport::failing(MailError::Transport("Connection refused".to_string()));
    let mailer = EmailDispatcher::new(Arc::new(transport), Sender::new("alerts@example.com"));
    let handle = spawn_welcome_emails(&bus, mailer).await.unwrap();

    let user = UserCreated {
        email: "ada@example.com".to_string(),
        name: "Ada Lovelace".to_string(),
        country: "United Kingdom".to_string(),
        investment_goals: "Growth".to_string(),
        risk_tolerance: "High".to_string(),
        preferred_industry: "Technology".to_string(),
    };
    bus.publish(EventEnvelope::from_event(&user, 0).unwrap())
        .await
        .unwrap();

    for _ in 0..50 {
        if counter.errors.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(counter.errors.load(Ordering::SeqCst), 1);
    assert_eq!(counter.warnings.load(Ordering::SeqCst), 0);
    assert!(!handle.is_finished());
    handle.abort();
}
