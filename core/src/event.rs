//! Named domain events and their wire envelope.
//!
//! Events represent facts about things that have already happened (for example
//! a user finishing sign-up). They are published by detached effects and
//! consumed by subscribers such as the welcome-email trigger.
//!
//! # Design
//!
//! Events travel as JSON because the consumers are not necessarily Rust
//! services: the hosted event API accepts `{name, data, ts}` bodies.
//!
//! # Example
//!
//! ```
//! use signalist_core::event::{Event, EventEnvelope};
//! use serde::Serialize;
//!
//! #[derive(Clone, Debug, Serialize)]
//! struct WatchlistUpdated {
//!     symbol: String,
//! }
//!
//! impl Event for WatchlistUpdated {
//!     fn name(&self) -> &'static str {
//!         "app/watchlist.updated"
//!     }
//! }
//!
//! let event = WatchlistUpdated { symbol: "AAPL".to_string() };
//! let envelope = EventEnvelope::from_event(&event, 1_700_000_000_000).unwrap();
//! assert_eq!(envelope.name, "app/watchlist.updated");
//! assert_eq!(envelope.data["symbol"], "AAPL");
//! ```

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Error types for event operations.
#[derive(Error, Debug)]
pub enum EventError {
    /// Failed to serialize event payload to JSON.
    #[error("Failed to serialize event: {0}")]
    SerializationError(String),

    /// Failed to deserialize event payload.
    #[error("Failed to deserialize event '{name}': {reason}")]
    DeserializationError {
        /// Event name carried by the envelope
        name: String,
        /// Underlying decoder message
        reason: String,
    },

    /// Envelope name does not match the requested event type.
    #[error("Unexpected event name: expected '{expected}', got '{actual}'")]
    UnexpectedName {
        /// Name the caller asked for
        expected: &'static str,
        /// Name found on the envelope
        actual: String,
    },
}

/// A named event that can be published on an event bus.
///
/// # Naming Convention
///
/// Names are namespaced with a slash, e.g. `"app/user.created"`. The name is
/// what subscribers filter on, so it must stay stable once published.
pub trait Event: Serialize + Send + Sync + 'static {
    /// Stable event name used for routing.
    fn name(&self) -> &'static str;
}

/// Wire representation of a published event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event name (e.g. `app/user.created`)
    pub name: String,
    /// JSON payload
    pub data: serde_json::Value,
    /// Creation time in milliseconds since the Unix epoch
    pub ts: i64,
}

impl EventEnvelope {
    /// Build an envelope from a typed event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::SerializationError`] if the payload cannot be encoded.
    pub fn from_event<E: Event>(event: &E, ts: i64) -> Result<Self, EventError> {
        let data = serde_json::to_value(event)
            .map_err(|e| EventError::SerializationError(e.to_string()))?;
        Ok(Self {
            name: event.name().to_string(),
            data,
            ts,
        })
    }

    /// Decode the payload as `T`, checking the envelope carries `expected` as its name.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnexpectedName`] when names differ, or
    /// [`EventError::DeserializationError`] when the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self, expected: &'static str) -> Result<T, EventError> {
        if self.name != expected {
            return Err(EventError::UnexpectedName {
                expected,
                actual: self.name.clone(),
            });
        }
        serde_json::from_value(self.data.clone()).map_err(|e| EventError::DeserializationError {
            name: self.name.clone(),
            reason: e.to_string(),
        })
    }
}
