//! HTTP client for a better-auth compatible provider.

use super::{AuthProvider, ForwardedHeaders, ProviderResponse, ProviderSession, SignUpRequest};
use crate::actions::Credentials;
use crate::error::{AuthError, Result};
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response};

/// Default provider location when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/auth";

/// Provider reached over HTTP.
///
/// Endpoints, relative to the base URL:
///
/// | Call | Request |
/// |------|---------|
/// | `sign_up_email` | `POST /sign-up/email` |
/// | `sign_in_email` | `POST /sign-in/email` |
/// | `sign_out` | `POST /sign-out` |
/// | `get_session` | `GET /get-session` |
///
/// # Example
///
/// ```no_run
/// use signalist_auth::providers::HttpAuthProvider;
///
/// let provider = HttpAuthProvider::new("http://localhost:3000/api/auth");
/// ```
#[derive(Clone, Debug)]
pub struct HttpAuthProvider {
    /// Base URL without trailing slash.
    base_url: String,

    /// HTTP client for making requests.
    http_client: Client,
}

impl HttpAuthProvider {
    /// Create a provider client for `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a provider client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client,
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(request: RequestBuilder, headers: Option<&ForwardedHeaders>) -> Result<ProviderResponse> {
        let request = match headers.and_then(ForwardedHeaders::cookie) {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        Self::read(response).await
    }

    async fn read(response: Response) -> Result<ProviderResponse> {
        let status = response.status();
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(ToString::to_string)
            .collect();

        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !status.is_success() {
            let body: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
            let field = |name: &str| {
                body.get(name)
                    .and_then(serde_json::Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
            };
            let message = field("message")
                .or_else(|| status.canonical_reason().map(ToString::to_string))
                .unwrap_or_else(|| status.to_string());

            tracing::debug!(status = status.as_u16(), %message, "Provider rejected request");
            return Err(AuthError::Provider {
                status: status.as_u16(),
                code: field("code"),
                message,
            });
        }

        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| AuthError::InvalidResponse(e.to_string()))?
        };

        Ok(ProviderResponse { body, set_cookies })
    }
}

impl AuthProvider for HttpAuthProvider {
    async fn sign_up_email(&self, request: SignUpRequest) -> Result<ProviderResponse> {
        let builder = self.http_client.post(self.url("/sign-up/email")).json(&request);
        Self::execute(builder, None).await
    }

    async fn sign_in_email(&self, credentials: Credentials) -> Result<ProviderResponse> {
        let builder = self.http_client.post(self.url("/sign-in/email")).json(&credentials);
        Self::execute(builder, None).await
    }

    async fn sign_out(&self, headers: ForwardedHeaders) -> Result<ProviderResponse> {
        let builder = self
            .http_client
            .post(self.url("/sign-out"))
            .json(&serde_json::json!({}));
        Self::execute(builder, Some(&headers)).await
    }

    async fn get_session(&self, headers: ForwardedHeaders) -> Result<Option<ProviderSession>> {
        let builder = self.http_client.get(self.url("/get-session"));
        let response = Self::execute(builder, Some(&headers)).await?;

        if response.is_falsy() {
            return Ok(None);
        }

        serde_json::from_value(response.body)
            .map(Some)
            .map_err(|e| AuthError::InvalidResponse(format!("session body: {e}")))
    }
}
