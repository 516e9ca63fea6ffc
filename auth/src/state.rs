//! Authentication state.
//!
//! Sign-in and sign-out are single round trips and keep no state. Sign-up
//! takes up to two provider calls, so each in-flight sign-up is tracked by its
//! correlation id until it completes.

use crate::actions::{ProviderFault, SignUpProfile};
use crate::providers::ForwardedHeaders;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Where an in-flight sign-up is.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpPhase {
    /// Waiting for the sign-up call.
    AwaitingProvider,
    /// Sign-up was ambiguous; waiting for the session lookup.
    ProbingSession {
        /// What made the sign-up ambiguous
        fault: ProviderFault,
    },
}

/// One sign-up in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSignUp {
    /// Submitted profile
    pub profile: SignUpProfile,
    /// Caller's cookies
    pub headers: ForwardedHeaders,
    /// Current phase
    pub phase: SignUpPhase,
    /// When the request arrived
    pub started_at: DateTime<Utc>,
}

/// State of the auth store.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Sign-ups in flight, by correlation id.
    pub sign_ups: HashMap<Uuid, PendingSignUp>,
}

impl AuthState {
    /// Number of sign-ups in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.sign_ups.len()
    }
}
