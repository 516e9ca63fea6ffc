//! Authentication environment.
//!
//! Dependencies injected into the auth reducers.

use crate::providers::AuthProvider;
use signalist_core::environment::Clock;
use signalist_core::event_bus::EventPublisher;
use std::sync::Arc;

/// Authentication environment.
///
/// # Type Parameters
///
/// - `P`: authentication provider
#[derive(Clone)]
pub struct AuthEnvironment<P>
where
    P: AuthProvider + Clone,
{
    /// Authentication provider.
    pub provider: P,

    /// Where `app/user.created` is published.
    pub events: Arc<dyn EventPublisher>,

    /// Time source for event timestamps.
    pub clock: Arc<dyn Clock>,
}

impl<P> AuthEnvironment<P>
where
    P: AuthProvider + Clone,
{
    /// Create a new authentication environment.
    #[must_use]
    pub fn new(provider: P, events: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            events,
            clock,
        }
    }
}

impl<P> std::fmt::Debug for AuthEnvironment<P>
where
    P: AuthProvider + Clone + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEnvironment")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
