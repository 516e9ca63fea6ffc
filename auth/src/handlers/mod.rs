//! HTTP handlers for the sign-in and sign-up forms.
//!
//! Each handler turns the request into an [`AuthAction`], waits for the
//! matching `*Completed` action, and answers with the [`ActionResult`] as
//! JSON plus any cookies the provider issued.
//!
//! Actions are keyed by an id generated here for every request. The
//! caller's `X-Correlation-ID` only labels logs, so two requests sending the
//! same header never see each other's result.
//!
//! | Result | Status |
//! |--------|--------|
//! | success | 200 |
//! | sign-in failure | 401 |
//! | sign-up: already registered | 409 |
//! | sign-up: password rejected | 400 |
//! | any other failure | 500 |
//! | no answer in time | 408 |

use crate::actions::{ActionResult, AuthAction, Credentials, SignUpProfile};
use crate::classify::SignUpFailure;
use crate::providers::{AuthProvider, ForwardedHeaders};
use crate::{AuthEnvironment, AuthReducer, AuthState};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use signalist_runtime::Store;
use signalist_web::{AppError, CorrelationId, ForwardedCookie};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// How long a handler waits for the terminal action by default.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Store driving the auth reducers.
pub type AuthStore<P> = Store<AuthState, AuthAction, AuthEnvironment<P>, AuthReducer<P>>;

/// Shared state for the auth routes.
#[derive(Clone)]
pub struct AuthApi<P>
where
    P: AuthProvider + Clone + 'static,
{
    /// Auth store.
    pub store: Arc<AuthStore<P>>,
    /// How long to wait for a terminal action.
    pub timeout: Duration,
}

impl<P> AuthApi<P>
where
    P: AuthProvider + Clone + 'static,
{
    /// Routes backed by `store`, waiting [`DEFAULT_REQUEST_TIMEOUT`].
    #[must_use]
    pub const fn new(store: Arc<AuthStore<P>>) -> Self {
        Self {
            store,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the wait for a terminal action.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn dispatch(
        &self,
        action: AuthAction,
        correlation_id: CorrelationId,
        operation: &str,
    ) -> Result<AuthAction, AppError> {
        let request_id = action.correlation_id();
        tracing::debug!(
            correlation_id = %correlation_id.0,
            %request_id,
            operation,
            "Dispatching auth request"
        );
        self.store
            .send_and_wait_for(
                action,
                move |a| a.is_terminal() && a.correlation_id() == request_id,
                self.timeout,
            )
            .await
            .map_err(|error| {
                tracing::warn!(
                    correlation_id = %correlation_id.0,
                    %request_id,
                    %error,
                    operation,
                    "No result for auth request"
                );
                AppError::from(error)
            })
    }
}

/// Response carrying the result body and relayed cookies.
fn respond(status: StatusCode, result: &ActionResult, set_cookies: &[String]) -> Response {
    let mut headers = HeaderMap::new();
    for cookie in set_cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            },
            Err(error) => tracing::warn!(%error, "Dropping unrepresentable Set-Cookie value"),
        }
    }
    (status, headers, Json(result)).into_response()
}

const fn sign_up_status(result: &ActionResult, failure: Option<SignUpFailure>) -> StatusCode {
    if result.is_success() {
        return StatusCode::OK;
    }
    match failure {
        Some(SignUpFailure::AlreadyRegistered) => StatusCode::CONFLICT,
        Some(SignUpFailure::PasswordRequirements) => StatusCode::BAD_REQUEST,
        Some(SignUpFailure::Other) | None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Sign in with email and password.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/sign-in
/// Content-Type: application/json
///
/// { "email": "ada@example.com", "password": "..." }
/// ```
///
/// # Errors
///
/// Returns 408 if no result arrives in time, 503 while shutting down.
pub async fn sign_in<P>(
    State(api): State<AuthApi<P>>,
    correlation_id: CorrelationId,
    Json(credentials): Json<Credentials>,
) -> Result<Response, AppError>
where
    P: AuthProvider + Clone + 'static,
{
    let action = AuthAction::SignIn {
        correlation_id: Uuid::new_v4(),
        credentials,
    };

    match api.dispatch(action, correlation_id, "sign_in").await? {
        AuthAction::SignInCompleted {
            result,
            set_cookies,
            ..
        } => {
            let status = if result.is_success() {
                StatusCode::OK
            } else {
                StatusCode::UNAUTHORIZED
            };
            Ok(respond(status, &result, &set_cookies))
        },
        _ => Err(AppError::internal("Unexpected action received")),
    }
}

/// Create an account.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/sign-up
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "password": "...",
///   "fullName": "Ada Lovelace",
///   "country": "United Kingdom",
///   "investmentGoals": "Growth",
///   "riskTolerance": "High",
///   "preferredIndustry": "Technology"
/// }
/// ```
///
/// # Errors
///
/// Returns 408 if no result arrives in time, 503 while shutting down.
pub async fn sign_up<P>(
    State(api): State<AuthApi<P>>,
    correlation_id: CorrelationId,
    ForwardedCookie(cookie): ForwardedCookie,
    Json(profile): Json<SignUpProfile>,
) -> Result<Response, AppError>
where
    P: AuthProvider + Clone + 'static,
{
    let action = AuthAction::SignUp {
        correlation_id: Uuid::new_v4(),
        profile,
        headers: ForwardedHeaders::new(cookie),
    };

    match api.dispatch(action, correlation_id, "sign_up").await? {
        AuthAction::SignUpCompleted {
            result,
            failure,
            set_cookies,
            ..
        } => Ok(respond(sign_up_status(&result, failure), &result, &set_cookies)),
        _ => Err(AppError::internal("Unexpected action received")),
    }
}

/// End the caller's session.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/sign-out
/// Cookie: better-auth.session_token=...
/// ```
///
/// # Errors
///
/// Returns 408 if no result arrives in time, 503 while shutting down.
pub async fn sign_out<P>(
    State(api): State<AuthApi<P>>,
    correlation_id: CorrelationId,
    ForwardedCookie(cookie): ForwardedCookie,
) -> Result<Response, AppError>
where
    P: AuthProvider + Clone + 'static,
{
    let action = AuthAction::SignOut {
        correlation_id: Uuid::new_v4(),
        headers: ForwardedHeaders::new(cookie),
    };

    match api.dispatch(action, correlation_id, "sign_out").await? {
        AuthAction::SignOutCompleted {
            result,
            set_cookies,
            ..
        } => {
            let status = if result.is_success() {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Ok(respond(status, &result, &set_cookies))
        },
        _ => Err(AppError::internal("Unexpected action received")),
    }
}
