//! Sign-out reducer.

use crate::actions::{ActionResult, AuthAction};
use crate::environment::AuthEnvironment;
use crate::providers::AuthProvider;
use crate::state::AuthState;
use signalist_core::effect::Effect;
use signalist_core::reducer::Reducer;
use signalist_core::{SmallVec, smallvec};

/// The only failure message sign-out ever reports.
pub const SIGN_OUT_FAILED: &str = "Sign out failed";

/// Sign-out reducer.
///
/// Forwards the caller's cookies to the provider and relays the cookies it
/// sends back (which expire the session).
#[derive(Debug, Clone)]
pub struct SignOutReducer<P> {
    _phantom: std::marker::PhantomData<P>,
}

impl<P> SignOutReducer<P> {
    /// Create a new sign-out reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P> Default for SignOutReducer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Reducer for SignOutReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<P>;

    fn reduce(
        &self,
        _state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::SignOut {
                correlation_id,
                headers,
            } => {
                let provider = env.provider.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let outcome = provider.sign_out(headers).await;
                    let (result, set_cookies) = match outcome {
                        Ok(response) if response.error().is_none() => {
                            tracing::info!(%correlation_id, "Signed out");
                            (ActionResult::ok_empty(), response.set_cookies)
                        },
                        Ok(response) => {
                            tracing::info!(%correlation_id, body = %response.body, "Sign out failed");
                            (ActionResult::failure(SIGN_OUT_FAILED), Vec::new())
                        },
                        Err(error) => {
                            tracing::info!(%correlation_id, %error, "Sign out failed");
                            (ActionResult::failure(SIGN_OUT_FAILED), Vec::new())
                        },
                    };

                    Some(AuthAction::SignOutCompleted {
                        correlation_id,
                        result,
                        set_cookies,
                    })
                }))]
            },

            AuthAction::SignOutCompleted { .. } => smallvec![Effect::None],

            _ => SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::mocks::MockAuthProvider;
    use crate::providers::{ForwardedHeaders, ProviderResponse};
    use signalist_testing::mocks::InMemoryEventBus;
    use signalist_testing::{ReducerTest, effects::collect_actions, test_clock};
    use std::sync::Arc;
    use uuid::Uuid;

    async fn run(provider: MockAuthProvider) -> AuthAction {
        let env = AuthEnvironment::new(
            provider,
            Arc::new(InMemoryEventBus::new()),
            Arc::new(test_clock()),
        );
        let (_, effects) = ReducerTest::new(SignOutReducer::new())
            .with_env(env)
            .given_state(AuthState::default())
            .when_action(AuthAction::SignOut {
                correlation_id: Uuid::nil(),
                headers: ForwardedHeaders::new(Some("session_token=abc".to_string())),
            })
            .into_effects();

        let mut actions = collect_actions(effects).await;
        assert_eq!(actions.len(), 1);
        actions.remove(0)
    }

    #[tokio::test]
    async fn success_is_empty_and_forwards_cookie() {
        let provider = MockAuthProvider::new().with_sign_out(Ok(ProviderResponse::new(
            serde_json::json!({ "success": true }),
        )
        .with_set_cookies(vec!["session_token=; Max-Age=0".to_string()])));

        let action = run(provider.clone()).await;

        assert_eq!(
            action,
            AuthAction::SignOutCompleted {
                correlation_id: Uuid::nil(),
                result: ActionResult::ok_empty(),
                set_cookies: vec!["session_token=; Max-Age=0".to_string()],
            }
        );
        assert_eq!(
            provider.sign_out_headers()[0].cookie(),
            Some("session_token=abc")
        );
    }

    #[tokio::test]
    async fn failure_reports_fixed_message() {
        let provider = MockAuthProvider::new()
            .with_sign_out(Err(AuthError::Transport("timed out".to_string())));

        let action = run(provider).await;

        assert_eq!(
            action,
            AuthAction::SignOutCompleted {
                correlation_id: Uuid::nil(),
                result: ActionResult::failure("Sign out failed"),
                set_cookies: vec![],
            }
        );
    }
}
