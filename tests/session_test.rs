mod common;

use board_sync::clients::StoreClient;
use board_sync::model::{LoginRequest, RegisterRequest};
use board_sync::session::{SessionError, SessionState};
use common::{post_json, start, user_json};
use serde_json::json;
use std::time::Duration;
use store_framework::mock::MockTransport;
use store_framework::{ApiError, ApiErrorKind, Method};

fn login() -> LoginRequest {
    LoginRequest::new("alice@example.com", "Secret123")
}

#[tokio::test]
async fn test_check_identity() {
    let mock = MockTransport::new();
    mock.expect_get("/api/auth/me")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_get("/api/auth/me")
        .return_status(401, json!({ "error": "Not authenticated" }));
    let system = start(&mock);

    let user = system.session.check_identity().await.unwrap();
    assert_eq!(user.map(|u| u.username), Some("alice".to_string()));
    assert!(system.session.is_authenticated());

    let user = system.session.check_identity().await.unwrap();
    assert_eq!(user, None);
    let snapshot = system.session.current().await.unwrap();
    assert_eq!(snapshot.state, SessionState::Anonymous);
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.revision, 2);
    mock.verify();
}

#[tokio::test]
async fn test_check_identity_network_failure_is_silent() {
    let mock = MockTransport::new();
    mock.expect_get("/api/auth/me")
        .return_err(ApiError::network("connection refused"));
    let system = start(&mock);

    assert_eq!(system.session.check_identity().await.unwrap(), None);
    let snapshot = system.session.snapshot();
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.revision, 0);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_login_success() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/login")
        .return_ok(json!({ "user": user_json(1, "alice"), "message": "Login successful" }));
    let system = start(&mock);

    let user = system.session.login(login()).await.unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(system.session.user(), Some(user));
    assert_eq!(
        mock.calls()[0].body,
        Some(json!({ "email": "alice@example.com", "password": "Secret123" }))
    );
    mock.verify();
}

#[tokio::test]
async fn test_invalid_credentials_never_authenticate() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/login")
        .return_status(400, json!({ "error": "Invalid email or password" }));
    let system = start(&mock);

    let err = system.session.login(login()).await.unwrap_err();

    assert!(matches!(err, SessionError::Api(ref e) if e.kind == ApiErrorKind::ClientError));
    let snapshot = system.session.current().await.unwrap();
    assert_eq!(snapshot.state, SessionState::Anonymous);
    assert_eq!(snapshot.error.as_deref(), Some("Invalid email or password"));
    assert_eq!(snapshot.revision, 0);
    mock.verify();
}

#[tokio::test]
async fn test_rejected_login_with_401_stays_anonymous() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/login")
        .return_status(401, json!({ "error": "Invalid credentials" }));
    let system = start(&mock);

    let err = system.session.login(login()).await.unwrap_err();

    assert!(matches!(err, SessionError::Api(ref e) if e.is_unauthorized()));
    let snapshot = system.session.current().await.unwrap();
    assert_eq!(snapshot.state, SessionState::Anonymous);
    assert_eq!(snapshot.revision, 0);
}

#[tokio::test]
async fn test_register_failure_stays_anonymous() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/register")
        .return_status(409, json!({ "error": "Email already exists" }));
    let system = start(&mock);

    let err = system
        .session
        .register(RegisterRequest::new(
            "carol@example.com",
            "carol",
            "Secret123",
            "Secret123",
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Api(ref e) if e.status == Some(409)));
    let snapshot = system.session.current().await.unwrap();
    assert_eq!(snapshot.state, SessionState::Anonymous);
    assert_eq!(snapshot.error.as_deref(), Some("Email already exists"));
    assert_eq!(snapshot.revision, 0);
    assert!(!snapshot.loading);
    mock.verify();
}

#[tokio::test]
async fn test_login_precheck_makes_no_call() {
    let mock = MockTransport::new();
    let system = start(&mock);

    for credentials in [
        LoginRequest::new("", "Secret123"),
        LoginRequest::new("not-an-email", "Secret123"),
        LoginRequest::new("alice@example.com", ""),
        LoginRequest::new("alice@example.com", "short"),
    ] {
        let err = system.session.login(credentials).await.unwrap_err();
        assert!(matches!(err, SessionError::ValidationError(_)), "{err:?}");
    }
    assert_eq!(mock.call_count(), 0);
    assert_eq!(system.session.snapshot().error, None);
}

#[tokio::test]
async fn test_register_sends_no_confirmation() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/register")
        .return_status(201, json!({ "user": user_json(3, "carol") }));
    let system = start(&mock);

    let user = system
        .session
        .register(RegisterRequest::new(
            "carol@example.com",
            "carol",
            "Secret123",
            "Secret123",
        ))
        .await
        .unwrap();

    assert_eq!(user.username, "carol");
    assert!(system.session.is_authenticated());
    let call = &mock.calls()[0];
    assert_eq!(call.method, Method::Post);
    assert_eq!(
        call.body,
        Some(json!({
            "email": "carol@example.com",
            "username": "carol",
            "password": "Secret123"
        }))
    );
    mock.verify();
}

#[tokio::test]
async fn test_register_precheck_makes_no_call() {
    let mock = MockTransport::new();
    let system = start(&mock);

    for registration in [
        RegisterRequest::new("carol@example.com", "carol", "Secret123", "Secret124"),
        RegisterRequest::new("carol@example.com", "ca", "Secret123", "Secret123"),
        RegisterRequest::new("carol@example.com", "carol!", "Secret123", "Secret123"),
        RegisterRequest::new("carol@example.com", "carol", "secret123", "secret123"),
        RegisterRequest::new("carol", "carol", "Secret123", "Secret123"),
    ] {
        let err = system.session.register(registration).await.unwrap_err();
        assert!(matches!(err, SessionError::ValidationError(_)), "{err:?}");
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_logout_always_ends_anonymous() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/login")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_post("/api/auth/logout").return_status(500, json!({}));
    mock.expect_post("/api/auth/login")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_post("/api/auth/logout")
        .return_err(ApiError::network("connection reset"));
    mock.expect_post("/api/auth/login")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_post("/api/auth/logout").return_ok(json!({}));
    let system = start(&mock);

    for expected_error in [
        Some("Server error. Please try again later."),
        Some("Network error. Please check your connection."),
        None,
    ] {
        system.session.login(login()).await.unwrap();
        let result = system.session.logout().await;
        assert_eq!(result.is_err(), expected_error.is_some());

        let snapshot = system.session.current().await.unwrap();
        assert_eq!(snapshot.state, SessionState::Anonymous);
        assert_eq!(snapshot.error.as_deref(), expected_error);
    }
    assert_eq!(system.session.snapshot().revision, 6);
    mock.verify();
}

#[tokio::test]
async fn test_unauthorized_post_call_signs_out_once() {
    let mock = MockTransport::new();
    mock.expect_get("/api/auth/me")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_get("/api/posts")
        .return_ok(json!({ "posts": [post_json(1, "mine")] }));
    mock.expect_post("/api/posts")
        .return_status(401, json!({ "error": "Session expired" }));
    mock.expect_delete("/api/posts/1")
        .return_status(401, json!({ "error": "Session expired" }));
    let system = start(&mock);

    system.session.check_identity().await.unwrap();
    system.posts.refresh().await.unwrap();
    let before = system.session.current().await.unwrap();
    assert!(before.state.is_authenticated());

    system.posts.create_post("still here?").await.unwrap_err();
    let after = system.session.current().await.unwrap();
    assert_eq!(after.state, SessionState::Anonymous);
    assert_eq!(after.revision, before.revision + 1);
    assert_eq!(
        after.error.as_deref(),
        Some("Authentication required. Please log in.")
    );

    // A second 401 finds the session already anonymous.
    system.posts.delete(1).await.unwrap_err();
    let again = system.session.current().await.unwrap();
    assert_eq!(again.revision, after.revision);
    assert_eq!(system.posts.snapshot().items.len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_revision_tracks_user_switch() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/login")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_get("/api/auth/me")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_post("/api/auth/login")
        .return_ok(json!({ "user": user_json(2, "bob") }));
    let system = start(&mock);

    system.session.login(login()).await.unwrap();
    system.session.check_identity().await.unwrap();
    assert_eq!(system.session.snapshot().revision, 1);

    system
        .session
        .login(LoginRequest::new("bob@example.com", "Secret123"))
        .await
        .unwrap();
    assert_eq!(system.session.snapshot().revision, 2);
    mock.verify();
}

#[tokio::test]
async fn test_subscribers_see_sign_in() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/login")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    let system = start(&mock);
    let mut state = system.session.subscribe();

    system.session.login(login()).await.unwrap();

    let seen = state
        .wait_for(|s| s.state.is_authenticated() && !s.loading)
        .await
        .unwrap()
        .clone();
    assert_eq!(seen.revision, 1);
}

#[tokio::test]
async fn test_login_survives_earlier_unauthorized() {
    let mock = MockTransport::new();
    mock.expect_post("/api/auth/login")
        .with_delay(Duration::from_millis(100))
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_get("/api/posts")
        .return_status(401, json!({ "error": "Not authenticated" }));
    let system = start(&mock);

    let pending_login = {
        let session = system.session.clone();
        tokio::spawn(async move { session.login(login()).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Sent before the login completed, so it carries no session.
    system.posts.refresh().await.unwrap_err();

    let user = pending_login.await.unwrap().unwrap();
    assert_eq!(user.id, 1);
    let snapshot = system.session.current().await.unwrap();
    assert_eq!(snapshot.state.user().map(|u| u.id), Some(1));
    assert_eq!(snapshot.revision, 1);
    assert_eq!(snapshot.error, None);
    mock.verify();
}

#[tokio::test]
async fn test_check_identity_clears_sign_out_message() {
    let mock = MockTransport::new();
    mock.expect_get("/api/auth/me")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    mock.expect_post("/api/posts")
        .return_status(401, json!({ "error": "Session expired" }));
    mock.expect_get("/api/auth/me")
        .return_ok(json!({ "user": user_json(1, "alice") }));
    let system = start(&mock);

    system.session.check_identity().await.unwrap();
    system.posts.create_post("hello").await.unwrap_err();
    let signed_out = system.session.current().await.unwrap();
    assert_eq!(
        signed_out.error.as_deref(),
        Some("Authentication required. Please log in.")
    );

    system.session.check_identity().await.unwrap();

    let snapshot = system.session.current().await.unwrap();
    assert!(snapshot.state.is_authenticated());
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.revision, 3);
    mock.verify();
}
