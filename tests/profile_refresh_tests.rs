// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile fetch with the single refresh-and-retry pipeline.

use cv_session::error::TransportError;
use cv_session::navigation::Route;
use cv_session::store::TokenStore;
use cv_session::transport::endpoints;
use cv_session::{AuthError, SessionState};
use serde_json::{json, Value};

mod common;
use common::{profile_body, Harness};

fn expired() -> Value {
    json!({"detail": "Given token not valid for any token type", "code": "token_not_valid"})
}

#[tokio::test]
async fn test_no_access_token_sends_nothing() {
    let h = Harness::new();

    let err = h.session.fetch_profile().await.unwrap_err();

    assert_eq!(err, AuthError::Unauthenticated);
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_valid_access_token() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport
        .respond(endpoints::PROFILE, 200, profile_body("alice"));

    let profile = h.session.fetch_profile().await.unwrap();

    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(profile.first_name, None);

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].bearer.as_deref(), Some("A1"));
    assert_eq!(h.transport.calls_to(endpoints::TOKEN_REFRESH), 0);
}

#[tokio::test]
async fn test_expired_access_refreshed_and_retried_once() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 401, expired());
    h.transport
        .respond(endpoints::TOKEN_REFRESH, 200, json!({"access": "A2"}));
    h.transport
        .respond(endpoints::PROFILE, 200, profile_body("alice"));

    let profile = h.session.fetch_profile().await.unwrap();
    assert_eq!(profile.username, "alice");

    // Access replaced, refresh untouched
    assert_eq!(h.access_token().as_deref(), Some("A2"));
    assert_eq!(h.refresh_token().as_deref(), Some("R1"));

    let requests = h.transport.requests();
    let order: Vec<_> = requests.iter().map(|r| r.path).collect();
    assert_eq!(
        order,
        vec![endpoints::PROFILE, endpoints::TOKEN_REFRESH, endpoints::PROFILE]
    );
    assert_eq!(requests[1].body, Some(json!({"refresh": "R1"})));
    assert!(requests[1].bearer.is_none());
    assert_eq!(requests[2].bearer.as_deref(), Some("A2"));
}

#[tokio::test]
async fn test_rejected_refresh_clears_session() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 401, expired());
    h.transport
        .respond(endpoints::TOKEN_REFRESH, 401, expired());

    let err = h.session.fetch_profile().await.unwrap_err();

    assert_eq!(err, AuthError::Unauthenticated);
    assert_eq!(h.access_token(), None);
    assert_eq!(h.refresh_token(), None);
    assert_eq!(h.transport.calls_to(endpoints::PROFILE), 1);
}

#[tokio::test]
async fn test_unreachable_refresh_clears_session() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 401, expired());
    h.transport
        .fail(endpoints::TOKEN_REFRESH, TransportError::Timeout);

    let err = h.session.fetch_profile().await.unwrap_err();

    assert_eq!(err, AuthError::Unauthenticated);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_refresh_without_access_field_clears_session() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 401, expired());
    h.transport
        .respond(endpoints::TOKEN_REFRESH, 200, json!({"refresh": "R9"}));

    let err = h.session.fetch_profile().await.unwrap_err();

    assert_eq!(err, AuthError::Unauthenticated);
    assert!(h.store.is_empty());
    assert_eq!(h.transport.calls_to(endpoints::PROFILE), 1);
}

#[tokio::test]
async fn test_missing_refresh_token_clears_session() {
    let h = Harness::new();
    h.store
        .set_pair(&cv_session::models::TokenPair::new("A1", ""))
        .unwrap();
    h.transport.respond(endpoints::PROFILE, 401, expired());

    let err = h.session.fetch_profile().await.unwrap_err();

    assert_eq!(err, AuthError::Unauthenticated);
    assert!(h.store.is_empty());
    assert_eq!(h.transport.calls_to(endpoints::TOKEN_REFRESH), 0);
}

#[tokio::test]
async fn test_retry_rejected_does_not_refresh_again() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 401, expired());
    h.transport
        .respond(endpoints::TOKEN_REFRESH, 200, json!({"access": "A2"}));
    h.transport.respond(endpoints::PROFILE, 401, expired());
    // Would be used by a second refresh; must stay unused
    h.transport
        .respond(endpoints::TOKEN_REFRESH, 200, json!({"access": "A3"}));

    let err = h.session.fetch_profile().await.unwrap_err();

    assert_eq!(err, AuthError::Unauthenticated);
    assert_eq!(h.transport.calls_to(endpoints::TOKEN_REFRESH), 1);
    assert_eq!(h.transport.calls_to(endpoints::PROFILE), 2);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_retry_server_error_keeps_tokens() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 401, expired());
    h.transport
        .respond(endpoints::TOKEN_REFRESH, 200, json!({"access": "A2"}));
    h.transport.respond(endpoints::PROFILE, 500, Value::Null);

    let err = h.session.fetch_profile().await.unwrap_err();

    assert!(matches!(err, AuthError::ProfileLoadFailed(_)));
    assert_eq!(h.access_token().as_deref(), Some("A2"));
    assert_eq!(h.refresh_token().as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_retry_without_response_keeps_tokens() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 401, expired());
    h.transport
        .respond(endpoints::TOKEN_REFRESH, 200, json!({"access": "A2"}));
    h.transport.fail(endpoints::PROFILE, TransportError::Timeout);

    let err = h.session.fetch_profile().await.unwrap_err();

    assert!(matches!(err, AuthError::Connectivity(_)));
    assert_eq!(h.access_token().as_deref(), Some("A2"));
    assert_eq!(h.refresh_token().as_deref(), Some("R1"));
    assert_eq!(h.transport.calls_to(endpoints::TOKEN_REFRESH), 1);
    assert_eq!(h.transport.calls_to(endpoints::PROFILE), 2);
}

#[tokio::test]
async fn test_non_session_failure_leaves_tokens() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(
        endpoints::PROFILE,
        400,
        json!({"error": "Failed to retrieve user profile"}),
    );

    let err = h.session.fetch_profile().await.unwrap_err();

    assert_eq!(
        err,
        AuthError::ProfileLoadFailed("Failed to load user profile".into())
    );
    assert_eq!(h.access_token().as_deref(), Some("A1"));
    assert_eq!(h.refresh_token().as_deref(), Some("R1"));
    assert_eq!(h.transport.calls_to(endpoints::TOKEN_REFRESH), 0);
}

#[tokio::test]
async fn test_unreachable_profile_leaves_tokens() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.fail(
        endpoints::PROFILE,
        TransportError::Unreachable("connection reset".into()),
    );

    let err = h.session.fetch_profile().await.unwrap_err();

    assert!(matches!(err, AuthError::Connectivity(_)));
    assert_eq!(h.access_token().as_deref(), Some("A1"));
}

#[tokio::test]
async fn test_malformed_profile_body() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport
        .respond(endpoints::PROFILE, 200, json!({"user": {"username": "alice"}}));

    let err = h.session.fetch_profile().await.unwrap_err();

    assert!(matches!(err, AuthError::ProfileLoadFailed(_)));
}

#[tokio::test]
async fn test_session_state_authenticated() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport
        .respond(endpoints::PROFILE, 200, profile_body("alice"));

    let state = h.session.session_state().await.unwrap();

    match state {
        SessionState::Authenticated(user) => assert_eq!(user.display_name(), "alice"),
        SessionState::Anonymous => panic!("expected an authenticated session"),
    }
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_session_state_anonymous_redirects_to_login() {
    let h = Harness::new();

    let state = h.session.session_state().await.unwrap();

    assert_eq!(state, SessionState::Anonymous);
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn test_session_state_reports_load_failure() {
    let h = Harness::new();
    h.seed_tokens("A1", "R1");
    h.transport.respond(endpoints::PROFILE, 503, Value::Null);

    let err = h.session.session_state().await.unwrap_err();

    assert!(matches!(err, AuthError::ProfileLoadFailed(_)));
    assert!(h.navigator.routes().is_empty());
}
