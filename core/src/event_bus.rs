//! Event bus abstraction decoupling sign-up from its follow-up work.
//!
//! Reducers never talk to a concrete bus. They capture an
//! `Arc<dyn EventPublisher>` from their environment inside a detached effect,
//! so a slow or failing bus never holds up the request that produced the event.
//!
//! ```text
//! ┌──────────────┐   publish (detached)   ┌─────────────┐
//! │ Sign-up      │ ─────────────────────► │  Event bus  │
//! │ reducer      │                        └──────┬──────┘
//! └──────────────┘                               │ app/user.created
//!                                                ▼
//!                                        ┌───────────────┐
//!                                        │ Welcome email │
//!                                        └───────────────┘
//! ```
//!
//! # Implementations
//!
//! - `InMemoryEventBus` (testing crate) - in-process broadcast, also used by the
//!   server when no hosted event API is configured
//! - `InngestEventBus` (inngest crate) - hosted HTTP event API, publish only
//!
//! # Dyn Compatibility
//!
//! Both traits return `Pin<Box<dyn Future>>` instead of using `async fn` so
//! they can be used as trait objects.

use crate::event::EventEnvelope;
use futures::Stream;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during event bus operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventBusError {
    /// Failed to reach the event bus
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The bus rejected or failed to accept the event
    #[error("Publish failed for event '{name}': {reason}")]
    PublishFailed {
        /// The event name that failed
        name: String,
        /// The reason for failure
        reason: String,
    },

    /// Failed to subscribe to event names
    #[error("Subscription failed for events {names:?}: {reason}")]
    SubscriptionFailed {
        /// The event names that failed to subscribe
        names: Vec<String>,
        /// The reason for failure
        reason: String,
    },

    /// Failed to encode or decode an event
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Bus is missing required configuration
    #[error("Event bus not configured: {0}")]
    NotConfigured(String),
}

/// Receipt returned by a successful publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Identifiers assigned by the bus, one per accepted event
    pub ids: Vec<String>,
}

impl PublishReceipt {
    /// First assigned id, if the bus returned any.
    #[must_use]
    pub fn first_id(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }
}

/// Stream of events from subscriptions.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventEnvelope, EventBusError>> + Send>>;

/// Publishing half of an event bus.
///
/// Publishing is best-effort from the caller's point of view: callers that
/// fire-and-forget must log the error themselves and move on.
pub trait EventPublisher: Send + Sync {
    /// Publish one event.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::PublishFailed`] or
    /// [`EventBusError::ConnectionFailed`] if the bus does not accept the event.
    fn publish(
        &self,
        event: EventEnvelope,
    ) -> Pin<Box<dyn Future<Output = Result<PublishReceipt, EventBusError>> + Send + '_>>;
}

/// Event bus with in-process subscriptions.
pub trait EventBus: EventPublisher {
    /// Subscribe to one or more event names.
    ///
    /// Only events published after the subscription was created are delivered.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::SubscriptionFailed`] if subscription fails.
    fn subscribe(
        &self,
        names: &[&str],
    ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>>;
}
