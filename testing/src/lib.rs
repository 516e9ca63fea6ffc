//! # Signalist Testing
//!
//! Testing utilities for reducers and the services built on them.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - [`effects::collect_actions`] to drive returned effects to completion
//! - Mock environment collaborators: a fixed clock and event buses
//!
//! ## Example
//!
//! ```ignore
//! use signalist_testing::{ReducerTest, test_clock, mocks::InMemoryEventBus};
//!
//! #[tokio::test]
//! async fn sign_in_failure_is_generic() {
//!     let (_, effects) = ReducerTest::new(AuthReducer::new())
//!         .with_env(environment())
//!         .given_state(AuthState::default())
//!         .when_action(sign_in("ada@example.com", "wrong"))
//!         .into_effects();
//!
//!     let actions = signalist_testing::effects::collect_actions(effects).await;
//!     assert_eq!(actions.len(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use signalist_core::environment::Clock;

pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions, effects};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use futures::future::BoxFuture;
    use signalist_core::event::EventEnvelope;
    use signalist_core::event_bus::{
        EventBus, EventBusError, EventPublisher, EventStream, PublishReceipt,
    };
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::broadcast;

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use signalist_testing::mocks::FixedClock;
    /// use signalist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// In-process event bus.
    ///
    /// Records every published envelope and fans it out to live subscribers.
    /// Cloning shares the same bus.
    #[derive(Debug, Clone)]
    pub struct InMemoryEventBus {
        published: Arc<Mutex<Vec<EventEnvelope>>>,
        sender: broadcast::Sender<EventEnvelope>,
        next_id: Arc<AtomicU64>,
    }

    impl InMemoryEventBus {
        /// Create a bus with room for 256 undelivered events per subscriber.
        #[must_use]
        pub fn new() -> Self {
            Self::with_capacity(256)
        }

        /// Create a bus with a custom per-subscriber buffer.
        #[must_use]
        pub fn with_capacity(capacity: usize) -> Self {
            let (sender, _) = broadcast::channel(capacity.max(1));
            Self {
                published: Arc::new(Mutex::new(Vec::new())),
                sender,
                next_id: Arc::new(AtomicU64::new(1)),
            }
        }

        /// Snapshot of everything published so far, oldest first.
        #[must_use]
        pub fn published(&self) -> Vec<EventEnvelope> {
            self.published
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }

        /// Published envelopes with the given name.
        #[must_use]
        pub fn published_named(&self, name: &str) -> Vec<EventEnvelope> {
            self.published()
                .into_iter()
                .filter(|event| event.name == name)
                .collect()
        }
    }

    impl Default for InMemoryEventBus {
        fn default() -> Self {
            Self::new()
        }
    }

    impl EventPublisher for InMemoryEventBus {
        fn publish(
            &self,
            event: EventEnvelope,
        ) -> BoxFuture<'_, Result<PublishReceipt, EventBusError>> {
            Box::pin(async move {
                let id = format!("evt-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
                self.published
                    .lock()
                    .map_err(|_| EventBusError::PublishFailed {
                        name: event.name.clone(),
                        reason: "event log poisoned".to_string(),
                    })?
                    .push(event.clone());

                // No subscribers is not an error: the event is still recorded.
                let _ = self.sender.send(event);
                Ok(PublishReceipt { ids: vec![id] })
            })
        }
    }

    impl EventBus for InMemoryEventBus {
        fn subscribe(
            &self,
            names: &[&str],
        ) -> BoxFuture<'_, Result<EventStream, EventBusError>> {
            let names: Vec<String> = names.iter().map(ToString::to_string).collect();
            let mut rx = self.sender.subscribe();

            Box::pin(async move {
                let stream = async_stream::stream! {
                    loop {
                        match rx.recv().await {
                            Ok(event) if names.iter().any(|n| *n == event.name) => yield Ok(event),
                            Ok(_) => {},
                            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                                tracing::warn!(skipped, "In-memory subscriber lagged");
                            },
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                };
                Ok(Box::pin(stream) as EventStream)
            })
        }
    }

    /// Publisher that rejects every event, for exercising best-effort paths.
    #[derive(Debug, Clone, Default)]
    pub struct FailingEventPublisher {
        attempts: Arc<AtomicU64>,
    }

    impl FailingEventPublisher {
        /// Create a new failing publisher.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of publish calls made so far.
        #[must_use]
        pub fn attempts(&self) -> u64 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl EventPublisher for FailingEventPublisher {
        fn publish(
            &self,
            event: EventEnvelope,
        ) -> BoxFuture<'_, Result<PublishReceipt, EventBusError>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                Err(EventBusError::ConnectionFailed(format!(
                    "event bus unavailable for '{}'",
                    event.name
                )))
            })
        }
    }
}

pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::mocks::{FailingEventPublisher, InMemoryEventBus};
    use super::*;
    use futures::StreamExt;
    use signalist_core::event::EventEnvelope;
    use signalist_core::event_bus::{EventBus, EventPublisher};

    fn envelope(name: &str) -> EventEnvelope {
        EventEnvelope {
            name: name.to_string(),
            data: serde_json::json!({ "email": "ada@example.com" }),
            ts: 0,
        }
    }

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[tokio::test]
    async fn in_memory_bus_records_and_assigns_ids() {
        let bus = InMemoryEventBus::new();
        let first = bus.publish(envelope("app/user.created")).await.unwrap();
        let second = bus.publish(envelope("app/other")).await.unwrap();

        assert_eq!(first.first_id(), Some("evt-1"));
        assert_eq!(second.first_id(), Some("evt-2"));
        assert_eq!(bus.published().len(), 2);
        assert_eq!(bus.published_named("app/user.created").len(), 1);
    }

    #[tokio::test]
    async fn subscribers_only_see_requested_names() {
        let bus = InMemoryEventBus::new();
        let mut stream = bus.subscribe(&["app/user.created"]).await.unwrap();

        bus.publish(envelope("app/other")).await.unwrap();
        bus.publish(envelope("app/user.created")).await.unwrap();

        let received = stream.next().await.unwrap().unwrap();
        assert_eq!(received.name, "app/user.created");
    }

    #[tokio::test]
    async fn failing_publisher_counts_attempts() {
        let publisher = FailingEventPublisher::new();
        assert!(publisher.publish(envelope("app/user.created")).await.is_err());
        assert_eq!(publisher.attempts(), 1);
    }
}
