//! Authentication provider boundary.
//!
//! The provider owns users, password hashing and sessions. This crate only
//! forwards credentials and the caller's cookies, and reads back whatever the
//! provider answered. [`AuthProvider`] is the seam: the reducers depend on the
//! trait, the server plugs in [`HttpAuthProvider`], tests plug in
//! `MockAuthProvider`.
//!
//! # Response Shapes
//!
//! A provider call can fail in two ways that look different on the wire:
//!
//! - an `Err(AuthError)`: non-2xx status or network failure
//! - an `Ok` response whose body is `null` ("falsy") or carries an `error`
//!   member ("error-shaped")
//!
//! [`ProviderResponse::error`] normalises the second case.

use crate::actions::Credentials;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

pub mod http;

pub use http::HttpAuthProvider;

/// Body of a sign-up call.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    /// Account email
    pub email: String,
    /// Plain-text password (sent over TLS to the provider only)
    pub password: String,
    /// Display name
    pub name: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Request headers forwarded to the provider.
///
/// The provider identifies the session from the `Cookie` header, so that is
/// the only header carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders {
    cookie: Option<String>,
}

impl ForwardedHeaders {
    /// Headers carrying the given `Cookie` value.
    #[must_use]
    pub fn new(cookie: Option<String>) -> Self {
        Self {
            cookie: cookie.filter(|c| !c.trim().is_empty()),
        }
    }

    /// The `Cookie` header value, if any.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Merge cookies issued by a provider response into these headers.
    ///
    /// Each `Set-Cookie` value contributes its leading `name=value` pair;
    /// a cookie already present under the same name is replaced.
    #[must_use]
    pub fn with_set_cookies(&self, set_cookies: &[String]) -> Self {
        if set_cookies.is_empty() {
            return self.clone();
        }

        let mut pairs: Vec<(String, String)> = self
            .cookie
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .filter_map(split_pair)
            .collect();

        for set_cookie in set_cookies {
            let Some((name, value)) = set_cookie.split(';').next().and_then(split_pair) else {
                continue;
            };
            match pairs.iter_mut().find(|(existing, _)| *existing == name) {
                Some(pair) => pair.1 = value,
                None => pairs.push((name, value)),
            }
        }

        let cookie = pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        Self::new(Some(cookie))
    }
}

fn split_pair(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.trim().split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// What a provider call returned on a 2xx status.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Parsed JSON body (`null` when empty)
    pub body: serde_json::Value,
    /// `Set-Cookie` header values, in order
    pub set_cookies: Vec<String>,
}

/// The `error` member of an error-shaped body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderErrorBody {
    /// Human-readable message
    pub message: Option<String>,
    /// Machine-readable code
    pub code: Option<String>,
}

impl ProviderResponse {
    /// Response with a body and no cookies.
    #[must_use]
    pub const fn new(body: serde_json::Value) -> Self {
        Self {
            body,
            set_cookies: Vec::new(),
        }
    }

    /// Attach `Set-Cookie` values.
    #[must_use]
    pub fn with_set_cookies(mut self, set_cookies: Vec<String>) -> Self {
        self.set_cookies = set_cookies;
        self
    }

    /// Body is JSON `null`.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        self.body.is_null()
    }

    /// The `error` member, when the body is error-shaped.
    ///
    /// An `error` that is a bare string is taken as the message.
    #[must_use]
    pub fn error(&self) -> Option<ProviderErrorBody> {
        match self.body.get("error")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(message) => Some(ProviderErrorBody {
                message: Some(message.clone()),
                code: None,
            }),
            error => Some(ProviderErrorBody {
                message: string_field(error, "message"),
                code: string_field(error, "code"),
            }),
        }
    }
}

fn string_field(value: &serde_json::Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// User half of a provider session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Provider user id
    pub id: String,
    /// Account email
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// An active provider session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSession {
    /// Signed-in user
    pub user: SessionUser,
    /// Session record as the provider describes it
    #[serde(default)]
    pub session: serde_json::Value,
}

/// External authentication provider.
///
/// Calls take owned arguments so effects can move them into `'static`
/// futures.
pub trait AuthProvider: Send + Sync {
    /// Create an account (the provider may also sign the user in).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`](crate::AuthError::Provider) when the
    /// provider rejects the request, or
    /// [`AuthError::Transport`](crate::AuthError::Transport) on network failure.
    fn sign_up_email(
        &self,
        request: SignUpRequest,
    ) -> impl Future<Output = Result<ProviderResponse>> + Send;

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Same as [`AuthProvider::sign_up_email`].
    fn sign_in_email(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<ProviderResponse>> + Send;

    /// End the session identified by `headers`.
    ///
    /// # Errors
    ///
    /// Same as [`AuthProvider::sign_up_email`].
    fn sign_out(
        &self,
        headers: ForwardedHeaders,
    ) -> impl Future<Output = Result<ProviderResponse>> + Send;

    /// Look up the session identified by `headers`. Has no side effects.
    ///
    /// # Errors
    ///
    /// Same as [`AuthProvider::sign_up_email`], plus
    /// [`AuthError::InvalidResponse`](crate::AuthError::InvalidResponse) when
    /// the session body cannot be decoded.
    fn get_session(
        &self,
        headers: ForwardedHeaders,
    ) -> impl Future<Output = Result<Option<ProviderSession>>> + Send;
}
