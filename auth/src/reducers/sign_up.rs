//! Sign-up reducer with session reconciliation.
//!
//! # Flow
//!
//! 1. `SignUp`: record the request, call the provider
//! 2. `SignUpResponded`:
//!    - plain success: complete, publish `app/user.created`
//!    - anything else is ambiguous: the provider may have created the account
//!      and signed the user in before failing, so look up the session
//! 3. `SessionProbed`:
//!    - session for the submitted email: complete as success, publish
//!    - otherwise classify the failure and complete
//!
//! The session lookup has no side effects, so running it on every ambiguous
//! outcome is safe. Publishing is detached: the `SignUpCompleted` action does
//! not wait for it and a publish failure only reaches the log.

use crate::actions::{ActionResult, AuthAction, FaultOrigin, ProviderFault, SignUpOutcome, SignUpProfile};
use crate::classify::SignUpFailure;
use crate::environment::AuthEnvironment;
use crate::events::UserCreated;
use crate::providers::{AuthProvider, ProviderResponse, SignUpRequest};
use crate::state::{AuthState, PendingSignUp, SignUpPhase};
use signalist_core::effect::Effect;
use signalist_core::event::EventEnvelope;
use signalist_core::reducer::Reducer;
use signalist_core::{SmallVec, smallvec};
use std::sync::Arc;
use uuid::Uuid;

/// Message used when an error-shaped response has no message of its own.
pub const FALLBACK_FAULT_MESSAGE: &str = "Failed to create account";

/// Sign-up reducer.
#[derive(Debug, Clone)]
pub struct SignUpReducer<P> {
    _phantom: std::marker::PhantomData<P>,
}

impl<P> SignUpReducer<P> {
    /// Create a new sign-up reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P> Default for SignUpReducer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SignUpReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    /// Reduce the provider's answer to created-or-ambiguous.
    fn outcome(result: crate::Result<ProviderResponse>) -> SignUpOutcome {
        match result {
            Ok(response) if response.is_falsy() => SignUpOutcome::Ambiguous(ProviderFault {
                message: FALLBACK_FAULT_MESSAGE.to_string(),
                code: None,
                origin: FaultOrigin::ErrorResponse,
                response: Some(response),
            }),
            Ok(response) => match response.error() {
                None => SignUpOutcome::Created(response),
                Some(error) => SignUpOutcome::Ambiguous(ProviderFault {
                    message: error
                        .message
                        .unwrap_or_else(|| FALLBACK_FAULT_MESSAGE.to_string()),
                    code: error.code,
                    origin: FaultOrigin::ErrorResponse,
                    response: Some(response),
                }),
            },
            Err(error) => SignUpOutcome::Ambiguous(ProviderFault {
                message: error.message(),
                code: error.code().map(ToString::to_string),
                origin: FaultOrigin::Exception,
                response: None,
            }),
        }
    }

    /// Detached effect publishing `app/user.created`.
    fn publish_user_created(env: &AuthEnvironment<P>, profile: &SignUpProfile) -> Effect<AuthAction> {
        let events = Arc::clone(&env.events);
        let event = UserCreated::from(profile);
        let ts = env.clock.now().timestamp_millis();

        Effect::Future(Box::pin(async move {
            let envelope = match EventEnvelope::from_event(&event, ts) {
                Ok(envelope) => envelope,
                Err(error) => {
                    tracing::warn!(%error, email = %event.email, "Could not encode user.created (non-blocking)");
                    return None;
                },
            };

            match events.publish(envelope).await {
                Ok(receipt) => {
                    tracing::info!(
                        email = %event.email,
                        event_id = receipt.first_id().unwrap_or_default(),
                        "Published user.created"
                    );
                },
                Err(error) => {
                    tracing::warn!(%error, email = %event.email, "user.created publish failed (non-blocking)");
                },
            }
            None
        }))
    }

    /// Finish successfully: publish, then hand the result to the caller.
    fn succeed(
        env: &AuthEnvironment<P>,
        correlation_id: Uuid,
        profile: &SignUpProfile,
        response: Option<ProviderResponse>,
    ) -> SmallVec<[Effect<AuthAction>; 4]> {
        let (result, set_cookies) = match response {
            Some(response) => (ActionResult::ok(response.body), response.set_cookies),
            None => (ActionResult::ok_empty(), Vec::new()),
        };

        smallvec![
            Self::publish_user_created(env, profile),
            complete(correlation_id, result, None, set_cookies),
        ]
    }
}

/// Terminal action, produced through an effect so it is broadcast.
fn complete(
    correlation_id: Uuid,
    result: ActionResult,
    failure: Option<SignUpFailure>,
    set_cookies: Vec<String>,
) -> Effect<AuthAction> {
    Effect::Future(Box::pin(async move {
        Some(AuthAction::SignUpCompleted {
            correlation_id,
            result,
            failure,
            set_cookies,
        })
    }))
}

impl<P> Reducer for SignUpReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<P>;

    #[allow(clippy::too_many_lines)] // One arm per step of the flow
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // SignUp: record and call the provider
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SignUp {
                correlation_id,
                profile,
                headers,
            } => {
                if state.sign_ups.contains_key(&correlation_id) {
                    tracing::warn!(%correlation_id, "Sign up already in flight, ignoring duplicate");
                    return smallvec![Effect::None];
                }

                let request = SignUpRequest {
                    email: profile.email.clone(),
                    password: profile.password.clone(),
                    name: profile.full_name.clone(),
                };

                state.sign_ups.insert(
                    correlation_id,
                    PendingSignUp {
                        profile,
                        headers,
                        phase: SignUpPhase::AwaitingProvider,
                        started_at: env.clock.now(),
                    },
                );

                let provider = env.provider.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    let result = provider.sign_up_email(request).await;
                    Some(AuthAction::SignUpResponded {
                        correlation_id,
                        outcome: Self::outcome(result),
                    })
                }))]
            },

            // ═══════════════════════════════════════════════════════════════
            // SignUpResponded: complete, or probe for a session
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SignUpResponded {
                correlation_id,
                outcome,
            } => match outcome {
                SignUpOutcome::Created(response) => {
                    let Some(pending) = state.sign_ups.remove(&correlation_id) else {
                        tracing::warn!(%correlation_id, "Sign up response for unknown request");
                        return smallvec![Effect::None];
                    };

                    tracing::info!(%correlation_id, email = %pending.profile.email, "Account created");
                    Self::succeed(env, correlation_id, &pending.profile, Some(response))
                },
                SignUpOutcome::Ambiguous(fault) => {
                    let Some(pending) = state.sign_ups.get_mut(&correlation_id) else {
                        tracing::warn!(%correlation_id, "Sign up response for unknown request");
                        return smallvec![Effect::None];
                    };

                    match fault.origin {
                        FaultOrigin::ErrorResponse => tracing::error!(
                            %correlation_id,
                            email = %pending.profile.email,
                            code = ?fault.code,
                            message = %fault.message,
                            "Sign up returned an error response, checking for a session"
                        ),
                        FaultOrigin::Exception => tracing::error!(
                            %correlation_id,
                            email = %pending.profile.email,
                            message = %fault.message,
                            "Sign up call failed, checking for a session"
                        ),
                    }

                    let headers = pending.headers.with_set_cookies(fault.set_cookies());
                    pending.phase = SignUpPhase::ProbingSession { fault };

                    let provider = env.provider.clone();
                    smallvec![Effect::Future(Box::pin(async move {
                        let session = match provider.get_session(headers).await {
                            Ok(session) => session,
                            Err(error) => {
                                tracing::warn!(%correlation_id, %error, "Could not verify session");
                                None
                            },
                        };
                        Some(AuthAction::SessionProbed {
                            correlation_id,
                            session,
                        })
                    }))]
                },
            },

            // ═══════════════════════════════════════════════════════════════
            // SessionProbed: reconcile
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SessionProbed {
                correlation_id,
                session,
            } => {
                let Some(pending) = state.sign_ups.remove(&correlation_id) else {
                    tracing::warn!(%correlation_id, "Session probe for unknown request");
                    return smallvec![Effect::None];
                };

                let SignUpPhase::ProbingSession { fault } = pending.phase else {
                    tracing::warn!(%correlation_id, "Session probe before provider responded");
                    return smallvec![complete(
                        correlation_id,
                        ActionResult::failure(SignUpFailure::Other.user_message()),
                        Some(SignUpFailure::Other),
                        Vec::new(),
                    )];
                };

                let signed_in = session
                    .as_ref()
                    .is_some_and(|session| session.user.email == pending.profile.email);

                if signed_in {
                    tracing::info!(
                        %correlation_id,
                        email = %pending.profile.email,
                        "Session found after ambiguous sign up, treating as success"
                    );
                    return Self::succeed(env, correlation_id, &pending.profile, fault.response);
                }

                let failure = SignUpFailure::of(&fault);
                tracing::info!(%correlation_id, ?failure, "Sign up failed");
                smallvec![complete(
                    correlation_id,
                    ActionResult::failure(failure.user_message()),
                    Some(failure),
                    Vec::new(),
                )]
            },

            AuthAction::SignUpCompleted { .. } => smallvec![Effect::None],

            _ => SmallVec::new(),
        }
    }
}
