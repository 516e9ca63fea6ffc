//! Email/password sign-in reducer.
//!
//! One provider call. Whatever goes wrong (wrong password, unknown user,
//! provider down) the caller sees the same message, so the form never
//! reveals which accounts exist.

use crate::actions::{ActionResult, AuthAction};
use crate::environment::AuthEnvironment;
use crate::providers::AuthProvider;
use crate::state::AuthState;
use signalist_core::effect::Effect;
use signalist_core::reducer::Reducer;
use signalist_core::{SmallVec, smallvec};

/// The only failure message sign-in ever reports.
pub const SIGN_IN_FAILED: &str = "Invalid email or password";

/// Sign-in reducer.
#[derive(Debug, Clone)]
pub struct SignInReducer<P> {
    _phantom: std::marker::PhantomData<P>,
}

impl<P> SignInReducer<P> {
    /// Create a new sign-in reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P> Default for SignInReducer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Reducer for SignInReducer<P>
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
            // ═══════════════════════════════════════════════════════════════
            // SignIn: call provider, collapse every failure to one message
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SignIn {
                correlation_id,
                credentials,
            } => {
                let provider = env.provider.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let email = credentials.email.clone();
                    let (result, set_cookies) = match provider.sign_in_email(credentials).await {
                        Ok(response) => {
                            if let Some(error) = response.error() {
                                tracing::info!(
                                    %correlation_id,
                                    %email,
                                    code = ?error.code,
                                    message = ?error.message,
                                    "Sign in failed"
                                );
                                (ActionResult::failure(SIGN_IN_FAILED), Vec::new())
                            } else {
                                tracing::info!(%correlation_id, %email, "Signed in");
                                (ActionResult::ok(response.body), response.set_cookies)
                            }
                        },
                        Err(error) => {
                            tracing::info!(%correlation_id, %email, %error, "Sign in failed");
                            (ActionResult::failure(SIGN_IN_FAILED), Vec::new())
                        },
                    };

                    Some(AuthAction::SignInCompleted {
                        correlation_id,
                        result,
                        set_cookies,
                    })
                }))]
            },

            // Terminal: the HTTP handler is waiting on the broadcast.
            AuthAction::SignInCompleted { .. } => smallvec![Effect::None],

            _ => SmallVec::new(),
        }
    }
}
