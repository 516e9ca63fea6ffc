//! In-process event bus for running without the hosted event API.
//!
//! Published envelopes are handed to live subscribers and then dropped;
//! nothing is retained. Publishing with no subscriber succeeds.

use futures::future::BoxFuture;
use signalist_core::event::EventEnvelope;
use signalist_core::event_bus::{
    EventBus, EventBusError, EventPublisher, EventStream, PublishReceipt,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Undelivered events buffered per subscriber.
pub const DEFAULT_CAPACITY: usize = 256;

/// Broadcast-only event bus. Cloning shares the same bus.
#[derive(Debug, Clone)]
pub struct LocalEventBus {
    sender: broadcast::Sender<EventEnvelope>,
    next_id: Arc<AtomicU64>,
}

impl LocalEventBus {
    /// Create a bus buffering [`DEFAULT_CAPACITY`] events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus with a custom per-subscriber buffer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LocalEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for LocalEventBus {
    fn publish(&self, event: EventEnvelope) -> BoxFuture<'_, Result<PublishReceipt, EventBusError>> {
        Box::pin(async move {
            let id = format!("local-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
            match self.sender.send(event) {
                Ok(receivers) => tracing::debug!(%id, receivers, "Event delivered in-process"),
                Err(broadcast::error::SendError(event)) => {
                    tracing::debug!(%id, name = %event.name, "No subscriber for event");
                },
            }
            Ok(PublishReceipt { ids: vec![id] })
        })
    }
}

impl EventBus for LocalEventBus {
    fn subscribe(&self, names: &[&str]) -> BoxFuture<'_, Result<EventStream, EventBusError>> {
        let names: Vec<String> = names.iter().map(ToString::to_string).collect();
        let mut rx = self.sender.subscribe();

        Box::pin(async move {
            let stream = async_stream::stream! {
                loop {
                    match rx.recv().await {
                        Ok(event) if names.iter().any(|n| *n == event.name) => yield Ok(event),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Local event subscriber lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            };
            Ok(Box::pin(stream) as EventStream)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use serde_json::json;

    fn envelope(name: &str) -> EventEnvelope {
        EventEnvelope {
            name: name.to_string(),
            data: json!({ "email": "ada@example.com" }),
            ts: 0,
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_succeeds() {
        let bus = LocalEventBus::new();

        let first = bus.publish(envelope("app/user.created")).await.unwrap();
        let second = bus.publish(envelope("app/user.created")).await.unwrap();

        assert_eq!(first.first_id(), Some("local-1"));
        assert_eq!(second.first_id(), Some("local-2"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_matching_events_only() {
        let bus = LocalEventBus::new();
        let mut stream = bus.subscribe(&["app/user.created"]).await.unwrap();

        bus.publish(envelope("app/other")).await.unwrap();
        bus.publish(envelope("app/user.created")).await.unwrap();

        let received = stream.next().await.unwrap().unwrap();
        assert_eq!(received.name, "app/user.created");
    }

    #[tokio::test]
    async fn events_are_not_retained_for_late_subscribers() {
        let bus = LocalEventBus::new();
        bus.publish(envelope("app/user.created")).await.unwrap();

        let mut stream = bus.subscribe(&["app/user.created"]).await.unwrap();
        bus.publish(envelope("app/user.created")).await.unwrap();

        let received = stream.next().await.unwrap().unwrap();
        assert_eq!(received.name, "app/user.created");
        let pending =
            tokio::time::timeout(std::time::Duration::from_millis(20), stream.next()).await;
        assert!(pending.is_err());
    }
}
