//! # Signalist Authentication
//!
//! Email/password sign-in, sign-up and sign-out against an external
//! authentication provider, implemented as reducers.
//!
//! ## Architecture
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! The provider does the real work (password storage, sessions). This crate
//! decides what the form sees:
//!
//! - sign-in failures all read `"Invalid email or password"`
//! - sign-up reconciles ambiguous provider answers by looking up the session,
//!   then classifies what is left ([`classify`])
//! - a successful sign-up publishes `app/user.created` without waiting on it
//!
//! ## Example
//!
//! ```ignore
//! use signalist_auth::*;
//! use signalist_runtime::Store;
//!
//! let env = AuthEnvironment::new(HttpAuthProvider::new(base_url), events, clock);
//! let store = Store::new(AuthState::default(), AuthReducer::new(), env);
//!
//! let done = store
//!     .send_and_wait_for(
//!         AuthAction::SignIn { correlation_id, credentials },
//!         |a| a.is_terminal() && a.correlation_id() == correlation_id,
//!         Duration::from_secs(10),
//!     )
//!     .await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod classify;
pub mod environment;
pub mod error;
pub mod events;
pub mod providers;
pub mod reducers;
pub mod state;

/// Mock provider implementations for testing.
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

/// HTTP handlers (requires the `axum` feature).
#[cfg(feature = "axum")]
pub mod handlers;

/// Axum router (requires the `axum` feature).
#[cfg(feature = "axum")]
pub mod router;

// Re-export main types for convenience
pub use actions::{ActionResult, AuthAction, Credentials, SignUpProfile};
pub use classify::SignUpFailure;
pub use environment::AuthEnvironment;
pub use error::{AuthError, Result};
pub use events::UserCreated;
pub use providers::{AuthProvider, ForwardedHeaders, HttpAuthProvider};
pub use reducers::AuthReducer;
pub use state::AuthState;

#[cfg(feature = "axum")]
pub use handlers::{AuthApi, AuthStore};
#[cfg(feature = "axum")]
pub use router::auth_router;
