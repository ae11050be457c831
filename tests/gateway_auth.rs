//! Gateway protocol-state tests: bearer attachment, the refresh-and-retry
//! cycle, envelope failures, and the login/logout surface.

use frontdesk_client::{ApiClient, ApiClientBuilder, Error};
use serde_json::{json, Value};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("frontdesk_client=debug")),
        )
        .with_test_writer()
        .try_init();
}

async fn client_for(base_url: &str) -> ApiClient {
    init_tracing();
    ApiClientBuilder::new()
        .base_url(base_url)
        .in_memory_session()
        .build()
        .await
        .expect("client build")
}

async fn authed_client(base_url: &str) -> ApiClient {
    let client = client_for(base_url).await;
    client
        .session()
        .set_credentials("old-access", Some("ref-1"))
        .await;
    client
}

/// 401 once, refresh succeeds, retry returns 200: the call yields the
/// retried data and the store ends holding the refreshed pair.
#[tokio::test]
async fn refresh_and_retry_recovers_from_401() {
    let mut server = mockito::Server::new_async().await;

    // The two attempts are distinguished by their bearer token.
    let first = server
        .mock("GET", "/rooms")
        .match_header("authorization", "Bearer old-access")
        .with_status(401)
        .with_body(r#"{"success":false,"message":"Token expired"}"#)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/accounts/refresh")
        .match_body(mockito::Matcher::Json(json!({ "refreshToken": "ref-1" })))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"accessToken":"new-access","refreshToken":"ref-2"}}"#)
        .create_async()
        .await;
    let retry = server
        .mock("GET", "/rooms")
        .match_header("authorization", "Bearer new-access")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"roomNumber":"101"}]}"#)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let rooms: Value = client.get("/rooms").await.unwrap();
    assert_eq!(rooms[0]["roomNumber"], json!("101"));

    let creds = client.session().credentials();
    assert_eq!(creds.access_token.as_deref(), Some("new-access"));
    assert_eq!(creds.refresh_token.as_deref(), Some("ref-2"));

    first.assert_async().await;
    refresh.assert_async().await;
    retry.assert_async().await;
}

/// A refresh response that omits the rotated refresh token retains the
/// stored one.
#[tokio::test]
async fn refresh_without_rotation_keeps_old_refresh_token() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rooms")
        .match_header("authorization", "Bearer old-access")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/accounts/refresh")
        .with_status(200)
        .with_body(r#"{"AccessToken":"new-access"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rooms")
        .match_header("authorization", "Bearer new-access")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let _: Value = client.get("/rooms").await.unwrap();

    let creds = client.session().credentials();
    assert_eq!(creds.access_token.as_deref(), Some("new-access"));
    assert_eq!(creds.refresh_token.as_deref(), Some("ref-1"));
}

/// Refresh succeeds but the retry is still 401: the call fails with
/// `Unauthorized` and the store ends cleared. Exactly one refresh per call.
#[tokio::test]
async fn second_401_clears_credentials() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/rooms")
        .match_header("authorization", "Bearer old-access")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/accounts/refresh")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"accessToken":"new-access"}}"#)
        .expect(1)
        .create_async()
        .await;
    let retry = server
        .mock("GET", "/rooms")
        .match_header("authorization", "Bearer new-access")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let err = client.get::<Value>("/rooms").await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(client.session().credentials().is_empty());

    first.assert_async().await;
    refresh.assert_async().await;
    retry.assert_async().await;
}

/// A rejected refresh clears credentials and fails the call closed.
#[tokio::test]
async fn rejected_refresh_forces_relogin() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rooms")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/accounts/refresh")
        .with_status(500)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let err = client.get::<Value>("/rooms").await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(client.session().credentials().is_empty());
}

/// With no stored refresh token the refresh protocol is a no-op: no call to
/// the refresh endpoint is ever made.
#[tokio::test]
async fn missing_refresh_token_skips_refresh_endpoint() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rooms")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/accounts/refresh")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url()).await;
    client.session().set_credentials("stale-access", None).await;

    let err = client.get::<Value>("/rooms").await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(client.session().credentials().is_empty());
    refresh.assert_async().await;
}

/// A 401 on an unauthenticated call (login) is a plain HTTP error, never a
/// refresh trigger.
#[tokio::test]
async fn login_rejection_never_triggers_refresh() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/accounts/login")
        .with_status(401)
        .with_body(r#"{"success":false,"message":"Bad credentials"}"#)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/accounts/refresh")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url()).await;
    let err = client.login("admin", "wrong").await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("expected Http, got {other:?}"),
    }
    refresh.assert_async().await;
}

/// A call that exceeds the deadline fails with `Timeout` and does not touch
/// the credential store.
#[tokio::test]
async fn timeout_leaves_credentials_untouched() {
    // A listener that accepts and then never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hold = tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            let (socket, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => return,
            };
            held.push(socket);
        }
    });

    let client = ApiClientBuilder::new()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_millis(200))
        .in_memory_session()
        .build()
        .await
        .unwrap();
    client
        .session()
        .set_credentials("old-access", Some("ref-1"))
        .await;

    let err = client.get::<Value>("/rooms").await.unwrap_err();
    assert!(matches!(err, Error::Timeout), "got {err:?}");

    let creds = client.session().credentials();
    assert_eq!(creds.access_token.as_deref(), Some("old-access"));
    assert_eq!(creds.refresh_token.as_deref(), Some("ref-1"));
    hold.abort();
}

/// Login commits both tokens and the account record; logout clears them.
#[tokio::test]
async fn login_then_logout_round_trip() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/accounts/login")
        .match_body(mockito::Matcher::Json(
            json!({ "username": "admin", "password": "secret" }),
        ))
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{
                "accessToken":"acc-1","refreshToken":"ref-1",
                "account":{"accountId":"A-1","username":"admin","role":"Admin"}
            }}"#,
        )
        .create_async()
        .await;
    server
        .mock("POST", "/accounts/logout")
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let client = client_for(&server.url()).await;
    let login = client.login("admin", "secret").await.unwrap();
    assert_eq!(login.access_token, "acc-1");
    assert_eq!(login.refresh_token, "ref-1");
    assert!(client.is_authenticated());
    assert_eq!(
        client.current_account().and_then(|a| a.username),
        Some("admin".to_string())
    );

    client.logout().await.unwrap();
    assert!(!client.is_authenticated());
    assert!(client.current_account().is_none());
}

/// Logout clears the local session even when the backend is unreachable.
#[tokio::test]
async fn logout_clears_locally_on_network_failure() {
    let client = client_for("http://127.0.0.1:9").await;
    client
        .session()
        .set_credentials("acc-1", Some("ref-1"))
        .await;

    let err = client.logout().await.unwrap_err();
    assert!(matches!(err, Error::Network(_) | Error::Timeout));
    assert!(client.session().credentials().is_empty());
}

/// A 2xx envelope reporting `success == false` surfaces as `ApiError` with
/// the backend's message.
#[tokio::test]
async fn failure_envelope_becomes_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/checkinout/check-in")
        .with_status(200)
        .with_body(r#"{"success":false,"message":"Room not ready"}"#)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let err = client
        .post::<Value>("/checkinout/check-in", json!({ "bookingId": "BK-1" }))
        .await
        .unwrap_err();
    match err {
        Error::Api { message } => assert_eq!(message, "Room not ready"),
        other => panic!("expected Api, got {other:?}"),
    }
}

/// The raw variant surfaces the failure envelope instead of unwrapping, so
/// callers can display the backend message verbatim.
#[tokio::test]
async fn post_raw_surfaces_failure_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bookings/BK-1/cancel")
        .with_status(200)
        .with_body(r#"{"Success":false,"Message":"Already cancelled"}"#)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let envelope = client
        .post_raw("/bookings/BK-1/cancel", json!({}))
        .await
        .unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.message.as_deref(), Some("Already cancelled"));
}

/// Non-2xx responses carry the envelope message when present, else a
/// generic status-code message.
#[tokio::test]
async fn http_error_prefers_envelope_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rooms")
        .with_status(503)
        .with_body(r#"{"message":"Backend maintenance"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/guests/search/")
        .with_status(502)
        .with_body("<html>bad gateway</html>")
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;

    match client.get::<Value>("/rooms").await.unwrap_err() {
        Error::Http { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Backend maintenance");
        }
        other => panic!("expected Http, got {other:?}"),
    }

    match client.get::<Value>("/guests/search/").await.unwrap_err() {
        Error::Http { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "HTTP error 502");
        }
        other => panic!("expected Http, got {other:?}"),
    }
}

/// An empty 2xx body is a successful-but-empty response.
#[tokio::test]
async fn empty_body_is_success() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/checkinout/check-out")
        .with_status(204)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let data: Value = client
        .post("/checkinout/check-out", json!({ "bookingId": "BK-1" }))
        .await
        .unwrap();
    assert_eq!(data, Value::Null);
}

/// Independent concurrent calls run without cross-call mutual exclusion.
#[tokio::test]
async fn concurrent_calls_are_independent() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rooms")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .expect(3)
        .create_async()
        .await;

    let client = authed_client(&server.url()).await;
    let (a, b, c) = tokio::join!(
        client.get::<Value>("/rooms"),
        client.get::<Value>("/rooms"),
        client.get::<Value>("/rooms"),
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
}
