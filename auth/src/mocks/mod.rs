//! Mock provider for testing.
//!
//! Responses are scripted up front; every call is recorded so tests can
//! assert on what the reducers sent.

use crate::actions::Credentials;
use crate::error::{AuthError, Result};
use crate::providers::{
    AuthProvider, ForwardedHeaders, ProviderResponse, ProviderSession, SessionUser, SignUpRequest,
};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Script {
    sign_up: Result<ProviderResponse>,
    sign_in: Result<ProviderResponse>,
    sign_out: Result<ProviderResponse>,
    session: Result<Option<ProviderSession>>,
    sign_up_requests: Vec<SignUpRequest>,
    sign_in_calls: usize,
    sign_out_headers: Vec<ForwardedHeaders>,
    session_headers: Vec<ForwardedHeaders>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            sign_up: Ok(ProviderResponse::new(serde_json::json!({ "token": "mock-token" }))),
            sign_in: Ok(ProviderResponse::new(serde_json::json!({ "token": "mock-token" }))),
            sign_out: Ok(ProviderResponse::new(serde_json::json!({ "success": true }))),
            session: Ok(None),
            sign_up_requests: Vec::new(),
            sign_in_calls: 0,
            sign_out_headers: Vec::new(),
            session_headers: Vec::new(),
        }
    }
}

/// Mock authentication provider.
///
/// Clones share the same script and call log.
///
/// # Example
///
/// ```
/// use signalist_auth::mocks::MockAuthProvider;
/// use signalist_auth::AuthError;
///
/// let provider = MockAuthProvider::new()
///     .with_sign_in(Err(AuthError::Provider {
///         status: 401,
///         code: Some("INVALID_EMAIL_OR_PASSWORD".to_string()),
///         message: "Invalid email or password".to_string(),
///     }));
/// assert_eq!(provider.sign_in_calls(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockAuthProvider {
    script: Arc<Mutex<Script>>,
}

impl MockAuthProvider {
    /// Create a provider where every call succeeds and no session exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the sign-up response.
    #[must_use]
    pub fn with_sign_up(self, response: Result<ProviderResponse>) -> Self {
        self.update(|script| script.sign_up = response);
        self
    }

    /// Script the sign-in response.
    #[must_use]
    pub fn with_sign_in(self, response: Result<ProviderResponse>) -> Self {
        self.update(|script| script.sign_in = response);
        self
    }

    /// Script the sign-out response.
    #[must_use]
    pub fn with_sign_out(self, response: Result<ProviderResponse>) -> Self {
        self.update(|script| script.sign_out = response);
        self
    }

    /// Script the session lookup.
    #[must_use]
    pub fn with_session(self, session: Result<Option<ProviderSession>>) -> Self {
        self.update(|script| script.session = session);
        self
    }

    /// A session for `email`, for use with [`MockAuthProvider::with_session`].
    #[must_use]
    pub fn session_for(email: &str) -> ProviderSession {
        ProviderSession {
            user: SessionUser {
                id: "user-1".to_string(),
                email: email.to_string(),
                name: None,
            },
            session: serde_json::json!({ "id": "session-1" }),
        }
    }

    /// Sign-up requests received, oldest first.
    #[must_use]
    pub fn sign_up_requests(&self) -> Vec<SignUpRequest> {
        self.read(|script| script.sign_up_requests.clone())
    }

    /// Number of sign-in calls.
    #[must_use]
    pub fn sign_in_calls(&self) -> usize {
        self.read(|script| script.sign_in_calls)
    }

    /// Headers passed to each sign-out call.
    #[must_use]
    pub fn sign_out_headers(&self) -> Vec<ForwardedHeaders> {
        self.read(|script| script.sign_out_headers.clone())
    }

    /// Headers passed to each session lookup.
    #[must_use]
    pub fn session_headers(&self) -> Vec<ForwardedHeaders> {
        self.read(|script| script.session_headers.clone())
    }

    fn update(&self, f: impl FnOnce(&mut Script)) {
        if let Ok(mut script) = self.script.lock() {
            f(&mut script);
        }
    }

    fn read<T: Default>(&self, f: impl FnOnce(&Script) -> T) -> T {
        self.script.lock().map(|script| f(&script)).unwrap_or_default()
    }

    fn call<T>(&self, f: impl FnOnce(&mut Script) -> Result<T>) -> Result<T> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| AuthError::Internal("mock provider lock poisoned".to_string()))?;
        f(&mut script)
    }
}

impl AuthProvider for MockAuthProvider {
    async fn sign_up_email(&self, request: SignUpRequest) -> Result<ProviderResponse> {
        self.call(|script| {
            script.sign_up_requests.push(request);
            script.sign_up.clone()
        })
    }

    async fn sign_in_email(&self, _credentials: Credentials) -> Result<ProviderResponse> {
        self.call(|script| {
            script.sign_in_calls += 1;
            script.sign_in.clone()
        })
    }

    async fn sign_out(&self, headers: ForwardedHeaders) -> Result<ProviderResponse> {
        self.call(|script| {
            script.sign_out_headers.push(headers);
            script.sign_out.clone()
        })
    }

    async fn get_session(&self, headers: ForwardedHeaders) -> Result<Option<ProviderSession>> {
        self.call(|script| {
            script.session_headers.push(headers);
            script.session.clone()
        })
    }
}
