//! Authentication reducers.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//! Provider calls and event publishing happen inside the returned effects.

pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

use crate::providers::AuthProvider;
use crate::{AuthAction, AuthEnvironment, AuthState};
use signalist_core::{SmallVec, effect::Effect, reducer::Reducer};

// Re-export
pub use sign_in::SignInReducer;
pub use sign_out::SignOutReducer;
pub use sign_up::SignUpReducer;

/// Unified authentication reducer.
///
/// Routes each action to the sub-reducer owning its flow.
#[derive(Clone, Debug)]
pub struct AuthReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    sign_in: SignInReducer<P>,
    sign_out: SignOutReducer<P>,
    sign_up: SignUpReducer<P>,
}

impl<P> AuthReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    /// Create a new unified auth reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sign_in: SignInReducer::new(),
            sign_out: SignOutReducer::new(),
            sign_up: SignUpReducer::new(),
        }
    }
}

impl<P> Default for AuthReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Reducer for AuthReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<P>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::SignIn { .. } | AuthAction::SignInCompleted { .. } => {
                self.sign_in.reduce(state, action, env)
            },

            AuthAction::SignOut { .. } | AuthAction::SignOutCompleted { .. } => {
                self.sign_out.reduce(state, action, env)
            },

            AuthAction::SignUp { .. }
            | AuthAction::SignUpResponded { .. }
            | AuthAction::SessionProbed { .. }
            | AuthAction::SignUpCompleted { .. } => self.sign_up.reduce(state, action, env),
        }
    }
}
