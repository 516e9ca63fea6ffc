//! Health check endpoints.
//!
//! Used by load balancers and container orchestrators.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use signalist_core::reducer::Reducer;
use signalist_runtime::Store;
use std::sync::Arc;

/// Health response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    /// `"ok"` or `"shutting_down"`
    pub status: &'static str,
    /// Effects still running in the store, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_effects: Option<usize>,
}

/// Liveness check. Does not look at any dependency.
///
/// ```text
/// GET /health
///
/// { "status": "ok" }
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<Health> {
    Json(Health {
        status: "ok",
        pending_effects: None,
    })
}

/// Readiness check backed by a store.
///
/// 200 while the store accepts actions, 503 once shutdown has begun.
///
/// ```text
/// GET /health/ready
///
/// { "status": "ok", "pending_effects": 0 }
/// ```
pub async fn readiness<S, A, E, R>(
    State(store): State<Arc<Store<S, A, E, R>>>,
) -> (StatusCode, Json<Health>)
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    S: Send + Sync + 'static,
    A: Send + Clone + 'static,
    E: Clone + Send + Sync + 'static,
{
    let pending_effects = Some(store.pending_effects());

    if store.is_shutting_down() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Health {
                status: "shutting_down",
                pending_effects,
            }),
        )
    } else {
        (
            StatusCode::OK,
            Json(Health {
                status: "ok",
                pending_effects,
            }),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use signalist_core::{SmallVec, effect::Effect};
    use std::time::Duration;

    #[derive(Clone)]
    struct NoopReducer;

    impl Reducer for NoopReducer {
        type State = ();
        type Action = ();
        type Environment = ();

        fn reduce(&self, _: &mut (), _: (), _: &()) -> SmallVec<[Effect<()>; 4]> {
            SmallVec::new()
        }
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        let Json(body) = health_check().await;
        assert_eq!(body.status, "ok");
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_tracks_shutdown() {
        let store = Arc::new(Store::new((), NoopReducer, ()));

        let (status, Json(body)) = readiness(State(Arc::clone(&store))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.pending_effects, Some(0));

        store.shutdown(Duration::from_millis(10)).await.unwrap();

        let (status, Json(body)) = readiness(State(store)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "shutting_down");
    }
}
