use serde_json::json;
use std::time::Duration;
use store_framework::{ApiErrorKind, HttpTransport, Method, RemoteClient, Transport};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> HttpTransport {
    HttpTransport::new(server.uri(), HttpTransport::DEFAULT_TIMEOUT).unwrap()
}

#[tokio::test]
async fn test_json_body_and_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "content": "hello" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "post": { "id": 1 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let value = transport(&server)
        .call(Method::Post, "/api/posts", Some(json!({ "content": "hello" })))
        .await
        .unwrap();

    assert_eq!(value["post"]["id"], 1);
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/4"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let value = transport(&server)
        .call(Method::Delete, "/api/posts/4", None)
        .await
        .unwrap();

    assert!(value.is_null());
}

#[tokio::test]
async fn test_status_classification() {
    let server = MockServer::start().await;
    let cases = [
        (401, ApiErrorKind::Unauthorized),
        (403, ApiErrorKind::Forbidden),
        (404, ApiErrorKind::ClientError),
        (422, ApiErrorKind::ClientError),
        (500, ApiErrorKind::ServerError),
        (503, ApiErrorKind::ServerError),
    ];
    for (status, _) in cases {
        Mock::given(method("GET"))
            .and(path(format!("/status/{status}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
    }

    let transport = transport(&server);
    for (status, kind) in cases {
        let err = transport
            .call(Method::Get, &format!("/status/{status}"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, kind, "status {status}");
        assert_eq!(err.status, Some(status));
    }
}

#[tokio::test]
async fn test_server_message_is_carried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/posts/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Post not found" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let transport = transport(&server);
    let not_found = transport
        .call(Method::Put, "/api/posts/9", Some(json!({ "content": "x" })))
        .await
        .unwrap_err();
    assert!(not_found.is_not_found());
    assert_eq!(not_found.user_message(), "Post not found");

    let bad = transport
        .call(Method::Post, "/api/auth/login", Some(json!({})))
        .await
        .unwrap_err();
    assert_eq!(bad.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = transport(&server)
        .call(Method::Get, "/api/posts", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Malformed);
    assert_eq!(err.status, Some(200));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri(), Duration::from_millis(50)).unwrap();
    let err = transport
        .call(Method::Get, "/api/posts", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Timeout);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_unreachable_server_is_network_failure() {
    let transport = HttpTransport::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

    let err = transport
        .call(Method::Get, "/health", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::NetworkFailure);
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc123; Path=/")
                .set_body_json(json!({ "user": { "id": 1 } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": { "id": 1 } })))
        .expect(1)
        .mount(&server)
        .await;

    let remote = RemoteClient::new(transport(&server));
    remote
        .post("/api/auth/login", Some(json!({ "email": "a@b.co" })))
        .await
        .unwrap();
    let me = remote.get("/api/auth/me").await.unwrap();

    assert_eq!(me["user"]["id"], 1);
}

#[tokio::test]
async fn test_health_probe_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let remote = RemoteClient::new(transport(&server));
    assert!(remote.health().await);

    let down = RemoteClient::new(
        HttpTransport::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap(),
    );
    assert!(!down.health().await);
}
