//! Axum router for the auth endpoints.

use crate::handlers::{self, AuthApi};
use crate::providers::AuthProvider;
use axum::{Router, routing::post};

/// Build the auth router.
///
/// Routes are relative; the server nests them under `/api/auth`:
///
/// - `POST /sign-in`
/// - `POST /sign-up`
/// - `POST /sign-out`
///
/// # Example
///
/// ```ignore
/// let api = AuthApi::new(Arc::new(store)).with_timeout(Duration::from_secs(10));
/// let app = Router::new().nest("/api/auth", auth_router(api));
/// ```
pub fn auth_router<P>(api: AuthApi<P>) -> Router
where
    P: AuthProvider + Clone + 'static,
{
    Router::new()
        .route("/sign-in", post(handlers::sign_in::<P>))
        .route("/sign-up", post(handlers::sign_up::<P>))
        .route("/sign-out", post(handlers::sign_out::<P>))
        .with_state(api)
}
