//! Event publisher for Inngest-compatible HTTP event APIs.
//!
//! Implements [`EventPublisher`] from `signalist-core` by posting each
//! envelope to `{base_url}/e/{event_key}`. Delivery, retries and fan-out to
//! functions are the hosted service's business; a successful publish only
//! means the API accepted the event.
//!
//! # Wire Format
//!
//! ```text
//! POST https://inn.gs/e/{event_key}
//! Content-Type: application/json
//!
//! { "name": "app/user.created", "data": { ... }, "ts": 1700000000000 }
//!
//! 200 OK
//! { "ids": ["01HF..."], "status": 200 }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use signalist_inngest::InngestEventBus;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bus = InngestEventBus::builder()
//!     .event_key("local-dev-key")
//!     .base_url("http://localhost:8288")
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use serde::Deserialize;
use signalist_core::event::EventEnvelope;
use signalist_core::event_bus::{EventBusError, EventPublisher, PublishReceipt};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Hosted event API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://inn.gs";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body returned by the event API.
#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    ids: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Publisher posting events to an Inngest-compatible event API.
#[derive(Clone)]
pub struct InngestEventBus {
    http_client: reqwest::Client,
    base_url: String,
    event_key: String,
}

impl fmt::Debug for InngestEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InngestEventBus")
            .field("base_url", &self.base_url)
            .field("event_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl InngestEventBus {
    /// Publisher for the hosted API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::NotConfigured`] if `event_key` is blank.
    pub fn new(event_key: impl Into<String>) -> Result<Self, EventBusError> {
        Self::builder().event_key(event_key).build()
    }

    /// Create a new builder for configuring the publisher.
    #[must_use]
    pub fn builder() -> InngestEventBusBuilder {
        InngestEventBusBuilder::default()
    }

    /// Base URL events are posted under.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/e/{}", self.base_url, self.event_key)
    }
}

/// Builder for configuring an [`InngestEventBus`].
#[derive(Debug, Default)]
pub struct InngestEventBusBuilder {
    base_url: Option<String>,
    event_key: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl InngestEventBusBuilder {
    /// Set the API base URL.
    ///
    /// Default: [`DEFAULT_BASE_URL`]. Point it at the dev server
    /// (`http://localhost:8288`) for local development.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the event key. Required.
    #[must_use]
    pub fn event_key(mut self, event_key: impl Into<String>) -> Self {
        self.event_key = Some(event_key.into());
        self
    }

    /// Set the per-request timeout.
    ///
    /// Default: 10 seconds. Ignored when a client is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the [`InngestEventBus`].
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::NotConfigured`] if the event key is missing or
    /// blank, or the HTTP client cannot be created.
    pub fn build(self) -> Result<InngestEventBus, EventBusError> {
        let event_key = self
            .event_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| EventBusError::NotConfigured("event key not set".to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .map_err(|e| {
                    EventBusError::NotConfigured(format!("Failed to create HTTP client: {e}"))
                })?,
        };

        tracing::info!(base_url = %base_url, "InngestEventBus created");

        Ok(InngestEventBus {
            http_client,
            base_url,
            event_key,
        })
    }
}

impl EventPublisher for InngestEventBus {
    fn publish(
        &self,
        event: EventEnvelope,
    ) -> Pin<Box<dyn Future<Output = Result<PublishReceipt, EventBusError>> + Send + '_>> {
        Box::pin(async move {
            let name = event.name.clone();

            let response = self
                .http_client
                .post(self.endpoint())
                .json(&event)
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(event = %name, error = %e, "Event API unreachable");
                    EventBusError::ConnectionFailed(e.to_string())
                })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| EventBusError::PublishFailed {
                name: name.clone(),
                reason: format!("Failed to read response: {e}"),
            })?;

            if !status.is_success() {
                tracing::error!(event = %name, status = %status, "Event API rejected event");
                return Err(EventBusError::PublishFailed {
                    name,
                    reason: format!("{status}: {}", body.trim()),
                });
            }

            let parsed: SendResponse =
                serde_json::from_str(&body).map_err(|e| EventBusError::PublishFailed {
                    name: name.clone(),
                    reason: format!("Unexpected response body: {e}"),
                })?;

            if let Some(error) = parsed.error {
                return Err(EventBusError::PublishFailed { name, reason: error });
            }

            tracing::debug!(event = %name, ids = ?parsed.ids, "Event published");
            Ok(PublishReceipt { ids: parsed.ids })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_event_key() {
        let err = InngestEventBus::builder().build().err();
        assert!(matches!(err, Some(EventBusError::NotConfigured(_))));

        let err = InngestEventBus::new("   ").err();
        assert!(matches!(err, Some(EventBusError::NotConfigured(_))));
    }

    #[test]
    fn builder_defaults_to_hosted_api() {
        let bus = InngestEventBus::new("key").ok();
        assert_eq!(bus.as_ref().map(InngestEventBus::base_url), Some(DEFAULT_BASE_URL));
        assert_eq!(
            bus.map(|b| b.endpoint()).as_deref(),
            Some("https://inn.gs/e/key")
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let bus = InngestEventBus::builder()
            .base_url("http://localhost:8288/")
            .event_key("dev")
            .build()
            .ok();
        assert_eq!(
            bus.map(|b| b.endpoint()).as_deref(),
            Some("http://localhost:8288/e/dev")
        );
    }

    #[test]
    fn debug_hides_event_key() {
        let rendered = InngestEventBus::new("super-secret")
            .map(|bus| format!("{bus:?}"))
            .unwrap_or_default();
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
