//! HTTP auth service and full page-load flow against a mock journal API.

use std::sync::Arc;
use std::time::Duration;

use journal_session::render::SectionVisibility;
use journal_session::services::auth::{AuthError, AuthService, Credentials};
use journal_session::services::http_auth::HttpAuthService;
use journal_session::services::token_store::{FileTokenStore, TokenStore};
use journal_session::{LoadOutcome, SessionGate, UserType};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status_ok(username: &str, user_type: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "authenticated": true,
        "user": { "id": 12, "username": username, "user_type": user_type }
    }))
}

fn client(server: &MockServer) -> HttpAuthService {
    HttpAuthService::new(&format!("{}/api/v1", server.uri()), Duration::from_secs(2)).unwrap()
}

// =============================================================================
// validate
// =============================================================================

#[tokio::test]
async fn validate_sends_bearer_token_and_decodes_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .and(header("authorization", "Bearer good-token"))
        .respond_with(status_ok("teacher_ann", "teacher"))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server).validate("good-token").await.unwrap();
    assert_eq!(user.id, 12);
    assert_eq!(user.username, "teacher_ann");
    assert_eq!(user.user_type, UserType::Teacher);
}

#[tokio::test]
async fn validate_unauthorized_is_invalid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})))
        .mount(&server)
        .await;

    assert_eq!(client(&server).validate("bad").await, Err(AuthError::InvalidToken));
}

#[tokio::test]
async fn validate_server_error_is_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(matches!(client(&server).validate("tok").await, Err(AuthError::Network(_))));
}

#[tokio::test]
async fn validate_timeout_is_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .respond_with(status_ok("alice", "student").set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    let svc = HttpAuthService::new(&format!("{}/api/v1", server.uri()), Duration::from_millis(200)).unwrap();
    assert!(matches!(svc.validate("tok").await, Err(AuthError::Network(_))));
}

#[tokio::test]
async fn validate_unreachable_host_is_network() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let svc = HttpAuthService::new(&uri, Duration::from_secs(1)).unwrap();
    assert!(matches!(svc.validate("tok").await, Err(AuthError::Network(_))));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_posts_form_and_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/auth/token"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=secret1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "jwt-1", "token_type": "bearer"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server).login(&Credentials::new("alice", "secret1")).await.unwrap();
    assert_eq!(token, "jwt-1");
}

#[tokio::test]
async fn login_rejected_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/auth/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server).login(&Credentials::new("alice", "nope")).await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
}

// =============================================================================
// Full page load with file-backed token
// =============================================================================

#[tokio::test]
async fn page_load_with_persisted_token_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .and(header("authorization", "Bearer persisted"))
        .respond_with(status_ok("alice", "student"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token");
    FileTokenStore::new(&token_path).set("persisted");

    let mut gate = SessionGate::new(
        Box::new(FileTokenStore::new(&token_path)),
        Arc::new(client(&server)),
        Box::new(SectionVisibility::default()),
    );
    assert_eq!(gate.on_load().await, LoadOutcome::Authenticated);
    assert_eq!(gate.session().user().map(|u| u.username.as_str()), Some("alice"));
    assert_eq!(FileTokenStore::new(&token_path).get().as_deref(), Some("persisted"));
}

#[tokio::test]
async fn page_load_with_rejected_token_removes_token_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token");
    FileTokenStore::new(&token_path).set("expired");

    let mut gate = SessionGate::new(
        Box::new(FileTokenStore::new(&token_path)),
        Arc::new(client(&server)),
        Box::new(SectionVisibility::default()),
    );
    assert_eq!(gate.on_load().await, LoadOutcome::Rejected(AuthError::InvalidToken));
    assert!(!token_path.exists());
}

#[tokio::test]
async fn login_then_reload_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "jwt-2", "token_type": "bearer"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .and(header("authorization", "Bearer jwt-2"))
        .respond_with(status_ok("bob", "student"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("session").join("token");

    let mut first = SessionGate::new(
        Box::new(FileTokenStore::new(&token_path)),
        Arc::new(client(&server)),
        Box::new(SectionVisibility::default()),
    );
    assert_eq!(first.on_load().await, LoadOutcome::NoToken);
    first.login(&Credentials::new("bob", "secret1")).await.unwrap();

    let mut reloaded = SessionGate::new(
        Box::new(FileTokenStore::new(&token_path)),
        Arc::new(client(&server)),
        Box::new(SectionVisibility::default()),
    );
    assert_eq!(reloaded.on_load().await, LoadOutcome::Authenticated);
}
