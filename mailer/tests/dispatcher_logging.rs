//! Log behaviour of the dispatcher: one line per send, error level on failure.

#![allow(clippy::unwrap_used)]

use signalist_mailer::mocks::MockMailTransport;
use signalist_mailer::{EmailDispatcher, MailError, Sender, WelcomeEmail};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

#[derive(Clone, Default)]
struct LevelCounter {
    errors: Arc<AtomicUsize>,
    infos: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for LevelCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        match *event.metadata().level() {
            Level::ERROR => {
                self.errors.fetch_add(1, Ordering::SeqCst);
            },
            Level::INFO => {
                self.infos.fetch_add(1, Ordering::SeqCst);
            },
            _ => {},
        }
    }
}

fn welcome() -> WelcomeEmail {
    WelcomeEmail {
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
        intro: "<p>Welcome.</p>".to_string(),
    }
}

#[tokio::test]
async fn failed_welcome_email_logs_one_error_and_propagates() {
    let counter = LevelCounter::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(counter.clone()));

    let error = MailError::Transport("Connection refused (os error 111)".to_string());
    let transport = MockMailTransport::failing(error.clone());
    let dispatcher = EmailDispatcher::new(Arc::new(transport), Sender::new("alerts@example.com"));

    let result = dispatcher.send_welcome_email(&welcome()).await;

    assert_eq!(result, Err(error));
    assert_eq!(counter.errors.load(Ordering::SeqCst), 1);
    assert_eq!(counter.infos.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_welcome_email_logs_one_info_line() {
    let counter = LevelCounter::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(counter.clone()));

    let transport = MockMailTransport::new();
    let dispatcher =
        EmailDispatcher::new(Arc::new(transport.clone()), Sender::new("alerts@example.com"));

    let sent = dispatcher.send_welcome_email(&welcome()).await.unwrap();

    assert_eq!(sent.message_id, "<mock-1@signalist.test>");
    assert_eq!(transport.sent().len(), 1);
    assert_eq!(counter.infos.load(Ordering::SeqCst), 1);
    assert_eq!(counter.errors.load(Ordering::SeqCst), 0);
}
