//! Axum glue shared by the Signalist HTTP surfaces.
//!
//! Handlers stay thin: they extract what they need, build an action, wait on
//! the store for the terminal action, and map it to a response.
//!
//! # Request Flow
//!
//! 1. [`middleware::correlation_id_layer`] tags the request with an id
//! 2. The handler extracts [`CorrelationId`] (and [`ForwardedCookie`] where
//!    upstream calls act for the browser)
//! 3. The handler dispatches an action and waits for its terminal action
//! 4. Failures to get an answer become an [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! use signalist_web::{AppError, CorrelationId};
//!
//! async fn sign_in(
//!     State(api): State<AuthApi<P>>,
//!     correlation_id: CorrelationId,
//!     Json(credentials): Json<Credentials>,
//! ) -> Result<Response, AppError> {
//!     let done = api.store.send_and_wait_for(action, predicate, timeout).await?;
//!     Ok(respond(done))
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

pub use error::AppError;
pub use extractors::{CorrelationId, ForwardedCookie};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
