//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: the id tying a request to its reducer actions and logs
//! - [`ForwardedCookie`]: the caller's `Cookie` header, to pass on to upstream
//!   services acting for the same browser session
//!
//! # Examples
//!
//! ```ignore
//! use signalist_web::{CorrelationId, ForwardedCookie};
//!
//! async fn handler(
//!     correlation_id: CorrelationId,
//!     ForwardedCookie(cookie): ForwardedCookie,
//! ) -> String {
//!     tracing::info!(correlation_id = %correlation_id.0, has_cookie = cookie.is_some());
//!     "ok".to_string()
//! }
//! ```

use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use std::convert::Infallible;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Taken from the request extensions when the correlation middleware ran,
/// then from a valid `X-Correlation-ID` header, otherwise freshly generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// The request's cookies, verbatim.
///
/// Multiple `Cookie` headers are joined with `"; "`. `None` when the request
/// carries no cookies (or only unreadable ones).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedCookie(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ForwardedCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let values: Vec<&str> = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();

        if values.is_empty() {
            Ok(Self(None))
        } else {
            Ok(Self(Some(values.join("; "))))
        }
    }
}
