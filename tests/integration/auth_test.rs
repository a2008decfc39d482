//! Integration tests for cookie sessions: register, login, logout, device trust.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use fithub_auth::{JwtEncoder, TokenKind};
use fithub_core::config::AuthConfig;
use fithub_database::repositories::UserRepository;
use fithub_entity::user::UserRole;
use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_sets_cookie_and_session_matches() {
    let app = TestApp::new().await;
    let user_id = app.create_user("ana@gym.test", UserRole::Member).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ana@gym.test", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["user"]["role"], "member");

    let token_cookie = response.set_cookie("auth_token").expect("auth_token cookie");
    assert!(token_cookie.contains("HttpOnly"));
    assert!(token_cookie.contains("SameSite=Lax"));
    assert!(token_cookie.contains("Max-Age=86400"));
    assert_eq!(response.cookie_value("user_role").as_deref(), Some("member"));
    assert!(response.cookie_value("session_id").is_some());

    let session = app
        .request("GET", "/api/auth/session", None, Some(&response.cookie_header()))
        .await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body["user"]["role"], "member");
    assert_eq!(session.body["user"]["id"], user_id.to_string());
}

#[tokio::test]
async fn test_register_creates_member_session() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "New@Gym.test", "name": "New Member", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["role"], "member");
    assert_eq!(response.body["user"]["email"], "new@gym.test");
    assert!(response.cookie_value("auth_token").is_some());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    let body = json!({ "email": "dup@gym.test", "name": "Dup", "password": PASSWORD });

    let first = app.request("POST", "/api/auth/register", Some(body), None).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "DUP@gym.test", "name": "Dup Again", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.error_code(), Some("CONFLICT"));
    assert!(second.set_cookie("auth_token").is_none());

    let stored = app
        .repos
        .users
        .find_by_email("dup@gym.test")
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(stored.name, "Dup");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "weak@gym.test", "name": "Weak", "password": "password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.create_user("bo@gym.test", UserRole::Member).await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "bo@gym.test", "password": "Not-The-Password-1" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@gym.test", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], unknown.body["error"]);
}

#[tokio::test]
async fn test_deactivated_account_cannot_login() {
    let app = TestApp::new().await;
    let id = app.create_user("gone@gym.test", UserRole::Member).await;

    let mut user = app.repos.users.find_by_id(id).await.unwrap().unwrap();
    user.is_active = false;
    app.repos.users.update(&user).await.unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "gone@gym.test", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_clears_cookies_and_revokes() {
    let app = TestApp::new().await;
    app.create_user("cy@gym.test", UserRole::Member).await;
    let cookie = app.login("cy@gym.test").await;

    let logout = app.request("POST", "/api/auth/logout", None, Some(&cookie)).await;
    assert_eq!(logout.status, StatusCode::OK);
    for name in ["auth_token", "session_id", "user_role"] {
        let line = logout.set_cookie(name).expect("cleared cookie");
        assert!(line.contains("Max-Age=0"), "{name} not cleared: {line}");
    }

    // Replaying the old cookie must not authenticate.
    let session = app.request("GET", "/api/auth/session", None, Some(&cookie)).await;
    assert_eq!(session.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_still_clears() {
    let app = TestApp::new().await;

    let logout = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert!(logout.set_cookie("auth_token").is_some());
}

#[tokio::test]
async fn test_session_without_cookie_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/session", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.error_code(), Some("UNAUTHORIZED"));
}

#[tokio::test]
async fn test_foreign_and_expired_tokens_rejected() {
    let app = TestApp::new().await;
    let id = app.create_user("di@gym.test", UserRole::Member).await;
    let user = app.repos.users.find_by_id(id).await.unwrap().unwrap();

    let foreign = JwtEncoder::new(&AuthConfig {
        jwt_secret: Some("some-other-secret".to_string()),
        ..AuthConfig::default()
    })
    .issue(&user, TokenKind::Session)
    .unwrap();

    let expired = JwtEncoder::new(&app.state.config.auth)
        .issue_at(&user, TokenKind::Session, Utc::now() - Duration::days(3))
        .unwrap();

    for token in [foreign.token, expired.token] {
        let cookie = format!("auth_token={token}");
        let response = app.request("GET", "/api/auth/session", None, Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new().await;
    app.create_user("eve@gym.test", UserRole::Trainer).await;
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "eve@gym.test", "password": PASSWORD })),
            None,
        )
        .await;
    let token = login.cookie_value("auth_token").unwrap();

    let req = http::Request::builder()
        .method("GET")
        .uri("/api/auth/session")
        .header("Authorization", format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["role"], "trainer");
}

#[tokio::test]
async fn test_device_trust_allows_passwordless_login() {
    let app = TestApp::new().await;
    app.create_user("fay@gym.test", UserRole::Member).await;
    let cookie = app.login("fay@gym.test").await;

    let trust = app
        .request("POST", "/api/auth/device-trust", None, Some(&cookie))
        .await;
    assert_eq!(trust.status, StatusCode::OK);
    let trust_line = trust.set_cookie("device_trust").expect("device_trust cookie");
    assert!(trust_line.contains("Max-Age=2592000"));
    let device_cookie = trust.cookie_header();

    let login = app
        .request("POST", "/api/auth/device-login", None, Some(&device_cookie))
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["email"], "fay@gym.test");
    assert!(login.cookie_value("auth_token").is_some());

    let revoke = app
        .request("DELETE", "/api/auth/device-trust", None, Some(&device_cookie))
        .await;
    assert_eq!(revoke.status, StatusCode::OK);
    assert!(revoke.set_cookie("device_trust").unwrap().contains("Max-Age=0"));

    let again = app
        .request("POST", "/api/auth/device-login", None, Some(&device_cookie))
        .await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_device_login_without_cookie() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/auth/device-login", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_token_is_not_a_trust_token() {
    let app = TestApp::new().await;
    app.create_user("gus@gym.test", UserRole::Member).await;
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "gus@gym.test", "password": PASSWORD })),
            None,
        )
        .await;
    let token = login.cookie_value("auth_token").unwrap();

    let cookie = format!("device_trust={token}");
    let response = app
        .request("POST", "/api/auth/device-login", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_secret_fails_login_with_server_error() {
    let app = TestApp::with_config(|config| config.auth.jwt_secret = None).await;
    app.create_user("hal@gym.test", UserRole::Member).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "hal@gym.test", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_code(), Some("CONFIGURATION_ERROR"));
}
