//! Integration tests for the auth flows running in a `Store`.

#![allow(clippy::unwrap_used, clippy::panic)]

use signalist_auth::mocks::MockAuthProvider;
use signalist_auth::providers::ProviderResponse;
use signalist_auth::{
    ActionResult, AuthAction, AuthEnvironment, AuthError, AuthReducer, AuthState, Credentials,
    ForwardedHeaders, SignUpProfile, UserCreated,
};
use signalist_runtime::Store;
use signalist_testing::mocks::InMemoryEventBus;
use signalist_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

type TestStore = Store<AuthState, AuthAction, AuthEnvironment<MockAuthProvider>, AuthReducer<MockAuthProvider>>;

fn store(provider: MockAuthProvider, bus: &InMemoryEventBus) -> TestStore {
    let env = AuthEnvironment::new(provider, Arc::new(bus.clone()), Arc::new(test_clock()));
    Store::new(AuthState::default(), AuthReducer::new(), env)
}

fn profile(email: &str) -> SignUpProfile {
    SignUpProfile {
        email: email.to_string(),
        password: "correct horse battery".to_string(),
        full_name: "Grace Hopper".to_string(),
        country: "United States".to_string(),
        investment_goals: "Income".to_string(),
        risk_tolerance: "Low".to_string(),
        preferred_industry: "Energy".to_string(),
    }
}

async fn request(store: &TestStore, action: AuthAction) -> AuthAction {
    let id = action.correlation_id();
    store
        .send_and_wait_for(
            action,
            move |a| a.is_terminal() && a.correlation_id() == id,
            Duration::from_secs(2),
        )
        .await
        .unwrap()
}

/// Wait until the detached publish has landed.
async fn published(bus: &InMemoryEventBus, expected: usize) -> Vec<UserCreated> {
    for _ in 0..50 {
        let events = bus.published_named(UserCreated::NAME);
        if events.len() >= expected {
            return events
                .iter()
                .map(|e| e.decode(UserCreated::NAME).unwrap())
                .collect();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {expected} user.created events");
}

#[tokio::test]
async fn sign_up_success_publishes_profile_once() {
    let bus = InMemoryEventBus::new();
    let store = store(MockAuthProvider::new(), &bus);

    let done = request(
        &store,
        AuthAction::SignUp {
            correlation_id: Uuid::new_v4(),
            profile: profile("grace@example.com"),
            headers: ForwardedHeaders::default(),
        },
    )
    .await;

    let AuthAction::SignUpCompleted { result, .. } = done else {
        panic!("expected SignUpCompleted");
    };
    assert!(result.is_success());

    let events = published(&bus, 1).await;
    assert_eq!(events, vec![UserCreated::from(&profile("grace@example.com"))]);

    store.shutdown(Duration::from_secs(1)).await.unwrap();
    assert_eq!(bus.published().len(), 1);
    assert_eq!(store.state(AuthState::in_flight).await, 0);
}

#[tokio::test]
async fn duplicate_email_without_session_fails_without_event() {
    let bus = InMemoryEventBus::new();
    let provider = MockAuthProvider::new().with_sign_up(Ok(ProviderResponse::new(serde_json::json!({
        "error": { "message": "User already exists", "code": "USER_ALREADY_EXISTS" }
    }))));
    let store = store(provider.clone(), &bus);

    let done = request(
        &store,
        AuthAction::SignUp {
            correlation_id: Uuid::new_v4(),
            profile: profile("grace@example.com"),
            headers: ForwardedHeaders::new(Some("session_token=stale".to_string())),
        },
    )
    .await;

    let AuthAction::SignUpCompleted { result, .. } = done else {
        panic!("expected SignUpCompleted");
    };
    assert_eq!(result, ActionResult::failure("Email already registered"));
    assert_eq!(provider.session_headers().len(), 1);

    store.shutdown(Duration::from_secs(1)).await.unwrap();
    assert!(bus.published().is_empty());
}

#[tokio::test]
async fn concurrent_requests_get_their_own_results() {
    let bus = InMemoryEventBus::new();
    let provider = MockAuthProvider::new()
        .with_sign_in(Err(AuthError::Provider {
            status: 401,
            code: None,
            message: "Invalid password".to_string(),
        }));
    let store = Arc::new(store(provider, &bus));

    let sign_in = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            request(
                &store,
                AuthAction::SignIn {
                    correlation_id: Uuid::new_v4(),
                    credentials: Credentials {
                        email: "grace@example.com".to_string(),
                        password: "nope".to_string(),
                    },
                },
            )
            .await
        })
    };
    let sign_up = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            request(
                &store,
                AuthAction::SignUp {
                    correlation_id: Uuid::new_v4(),
                    profile: profile("ada@example.com"),
                    headers: ForwardedHeaders::default(),
                },
            )
            .await
        })
    };

    let sign_in = sign_in.await.unwrap();
    let sign_up = sign_up.await.unwrap();

    assert!(matches!(
        sign_in,
        AuthAction::SignInCompleted { ref result, .. } if result.error() == Some("Invalid email or password")
    ));
    assert!(matches!(
        sign_up,
        AuthAction::SignUpCompleted { ref result, .. } if result.is_success()
    ));
}

#[tokio::test]
async fn sign_out_round_trip() {
    let bus = InMemoryEventBus::new();
    let provider = MockAuthProvider::new();
    let store = store(provider.clone(), &bus);

    let done = request(
        &store,
        AuthAction::SignOut {
            correlation_id: Uuid::new_v4(),
            headers: ForwardedHeaders::new(Some("session_token=abc".to_string())),
        },
    )
    .await;

    assert!(matches!(
        done,
        AuthAction::SignOutCompleted { ref result, .. } if *result == ActionResult::ok_empty()
    ));
    assert_eq!(provider.sign_out_headers().len(), 1);
}
