//! Router composition.
//!
//! ```text
//! GET  /health
//! GET  /health/ready
//! POST /api/auth/sign-in
//! POST /api/auth/sign-up
//! POST /api/auth/sign-out
//! GET  /api/test-email          (diagnostics enabled)
//! GET  /api/test-signup         (diagnostics enabled)
//! POST /api/test-signup         (diagnostics enabled)
//! ```

use crate::diagnostics::{Diagnostics, diagnostics_router};
use axum::{Router, routing::get};
use signalist_auth::providers::AuthProvider;
use signalist_auth::{AuthAction, AuthApi, AuthEnvironment, AuthReducer, AuthState, auth_router};
use signalist_web::correlation_id_layer;
use signalist_web::handlers::{health_check, readiness};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete router.
///
/// Diagnostics are mounted only when `diagnostics` is `Some`.
pub fn build_router<P>(auth: AuthApi<P>, diagnostics: Option<Diagnostics>) -> Router
where
    P: AuthProvider + Clone + 'static,
{
    let health = Router::new()
        .route("/health", get(health_check))
        .route(
            "/health/ready",
            get(readiness::<AuthState, AuthAction, AuthEnvironment<P>, AuthReducer<P>>),
        )
        .with_state(Arc::clone(&auth.store));

    let mut api = Router::new().nest("/auth", auth_router(auth));
    if let Some(diagnostics) = diagnostics {
        api = api.merge(diagnostics_router(diagnostics));
    }

    Router::new()
        .merge(health)
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
