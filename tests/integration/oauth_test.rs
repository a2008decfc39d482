//! Integration tests for external identity login and account sync.

mod helpers;

use http::StatusCode;

use fithub_database::repositories::UserRepository;
use fithub_entity::user::UserRole;
use helpers::TestApp;

/// Start the flow and return the anti-forgery state.
async fn begin(app: &TestApp) -> String {
    let response = app
        .request("GET", "/api/auth/oauth/stub/authorize", None, None)
        .await;
    assert_eq!(response.status, StatusCode::FOUND);

    let location = response.location().expect("redirect location");
    let state = response.cookie_value("oauth_state").expect("state cookie");
    assert_eq!(location, format!("https://idp.test/authorize?state={state}"));
    assert!(response.set_cookie("oauth_state").unwrap().contains("Max-Age=600"));
    state
}

async fn callback(app: &TestApp, query: &str, state_cookie: Option<&str>) -> helpers::TestResponse {
    let cookie = state_cookie.map(|s| format!("oauth_state={s}"));
    app.request(
        "GET",
        &format!("/api/auth/oauth/stub/callback?{query}"),
        None,
        cookie.as_deref(),
    )
    .await
}

#[tokio::test]
async fn test_existing_account_logs_in_and_keeps_role() {
    let app = TestApp::new().await;
    let id = app.create_user("kim@gym.test", UserRole::Trainer).await;
    let state = begin(&app).await;

    let response = callback(&app, &format!("code=kim%40gym.test&state={state}"), Some(&state)).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location().as_deref(), Some("/dashboard"));
    assert_eq!(response.cookie_value("user_role").as_deref(), Some("trainer"));
    assert!(response.set_cookie("oauth_state").unwrap().contains("Max-Age=0"));

    let session = app
        .request("GET", "/api/auth/session", None, Some(&response.cookie_header()))
        .await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body["user"]["id"], id.to_string());

    let user = app.repos.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.oauth_provider.as_deref(), Some("stub"));
    assert_eq!(user.role, UserRole::Trainer);
}

#[tokio::test]
async fn test_unknown_account_without_provisioning() {
    let app = TestApp::new().await;
    let state = begin(&app).await;

    let response = callback(&app, &format!("code=ghost%40gym.test&state={state}"), Some(&state)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("ACCOUNT_NOT_FOUND"));
    assert!(response.set_cookie("auth_token").is_none());
    assert!(
        app.repos
            .users
            .find_by_email("ghost@gym.test")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_unknown_account_with_provisioning_creates_member() {
    let app = TestApp::with_config(|config| config.oauth.auto_provision = true).await;
    let state = begin(&app).await;

    let response = callback(&app, &format!("code=lou%40gym.test&state={state}"), Some(&state)).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.cookie_value("user_role").as_deref(), Some("member"));

    let user = app
        .repos
        .users
        .find_by_email("lou@gym.test")
        .await
        .unwrap()
        .expect("provisioned");
    assert_eq!(user.role, UserRole::Member);
    assert!(user.password_hash.is_none());
    assert_eq!(user.name, "Stub User");
}

#[tokio::test]
async fn test_provider_denial_redirects_to_error_page() {
    let app = TestApp::new().await;
    let state = begin(&app).await;

    let response = callback(&app, &format!("error=access_denied&state={state}"), Some(&state)).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location().as_deref(), Some("/auth/error"));
    assert!(response.set_cookie("auth_token").is_none());
}

#[tokio::test]
async fn test_state_mismatch_redirects_to_error_page() {
    let app = TestApp::new().await;
    app.create_user("max@gym.test", UserRole::Member).await;
    let state = begin(&app).await;

    let forged = callback(&app, "code=max%40gym.test&state=forged", Some(&state)).await;
    assert_eq!(forged.status, StatusCode::FOUND);
    assert_eq!(forged.location().as_deref(), Some("/auth/error"));

    let missing_cookie = callback(&app, &format!("code=max%40gym.test&state={state}"), None).await;
    assert_eq!(missing_cookie.status, StatusCode::FOUND);
    assert_eq!(missing_cookie.location().as_deref(), Some("/auth/error"));
    assert!(missing_cookie.set_cookie("auth_token").is_none());
}

#[tokio::test]
async fn test_failed_exchange_redirects_to_error_page() {
    let app = TestApp::new().await;
    let state = begin(&app).await;

    let response = callback(&app, &format!("code=fail&state={state}"), Some(&state)).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location().as_deref(), Some("/auth/error"));
}

#[tokio::test]
async fn test_unknown_provider() {
    let app = TestApp::new().await;

    let authorize = app
        .request("GET", "/api/auth/oauth/nowhere/authorize", None, None)
        .await;
    assert_eq!(authorize.status, StatusCode::NOT_FOUND);

    let callback = app
        .request("GET", "/api/auth/oauth/nowhere/callback?code=x&state=y", None, Some("oauth_state=y"))
        .await;
    assert_eq!(callback.status, StatusCode::FOUND);
    assert_eq!(callback.location().as_deref(), Some("/auth/error"));
}

#[tokio::test]
async fn test_disabled_account_cannot_use_external_login() {
    let app = TestApp::new().await;
    let id = app.create_user("ned@gym.test", UserRole::Member).await;
    let mut user = app.repos.users.find_by_id(id).await.unwrap().unwrap();
    user.is_active = false;
    app.repos.users.update(&user).await.unwrap();

    let state = begin(&app).await;
    let response = callback(&app, &format!("code=ned%40gym.test&state={state}"), Some(&state)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.set_cookie("auth_token").is_none());
}
