//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::header::{COOKIE, LOCATION, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use fithub_api::AppState;
use fithub_auth::{ExternalIdentity, IdentityProvider, IdentityProviders, PasswordHasher};
use fithub_core::config::AppConfig;
use fithub_core::{AppError, AppResult};
use fithub_database::Repositories;
use fithub_database::repositories::{PlanRepository, UserRepository};
use fithub_entity::membership::CreatePlan;
use fithub_entity::user::{CreateUser, UserRole};

/// Password that satisfies the strength policy.
pub const PASSWORD: &str = "Treadmill-Sprint-42";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct service access
    pub state: AppState,
    /// Repositories behind the router
    pub repos: Repositories,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory store
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default configuration
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("integration-test-secret".to_string());
        config.membership.sweep_interval_seconds = 0;
        adjust(&mut config);

        let repos = Repositories::in_memory();
        let mut providers = IdentityProviders::new();
        providers.register("stub", Arc::new(StubProvider));

        let state = AppState::new(config, repos.clone(), providers);
        let router = fithub_api::build_app(state.clone());

        Self {
            router,
            state,
            repos,
        }
    }

    /// Create a user directly in the store and return their ID
    pub async fn create_user(&self, email: &str, role: UserRole) -> Uuid {
        let hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");
        self.repos
            .users
            .create(CreateUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                password_hash: Some(hash),
                role,
                oauth_provider: None,
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Create an active plan and return its ID
    pub async fn create_plan(&self, name: &str, duration_days: i32) -> Uuid {
        self.repos
            .plans
            .create(CreatePlan {
                name: name.to_string(),
                description: None,
                duration_days,
                price_cents: 4900,
                currency: "USD".to_string(),
            })
            .await
            .expect("Failed to create test plan")
            .id
    }

    /// Login and return the `Cookie` header value for the new session
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.cookie_header()
    }

    /// Create a user with `role` and log them in
    pub async fn user_session(&self, email: &str, role: UserRole) -> (Uuid, String) {
        let id = self.create_user(email, role).await;
        let cookie = self.login(email).await;
        (id, cookie)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Every `Set-Cookie` header
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// The full `Set-Cookie` line for `name`
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies().into_iter().find(|c| c.starts_with(&prefix))
    }

    /// The value set for cookie `name`
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let line = self.set_cookie(name)?;
        let pair = line.split(';').next()?;
        pair.split_once('=').map(|(_, v)| v.to_string())
    }

    /// A `Cookie` request header replaying every non-empty cookie that was set
    pub fn cookie_header(&self) -> String {
        self.set_cookies()
            .iter()
            .filter_map(|c| c.split(';').next())
            .filter(|pair| !pair.ends_with('='))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Location` header of a redirect
    pub fn location(&self) -> Option<String> {
        self.headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// The `code` field of an error envelope
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("code").and_then(Value::as_str)
    }
}

/// Identity provider that treats the authorization code as the email.
///
/// The code `fail` simulates a provider error.
pub struct StubProvider;

#[async_trait]
impl IdentityProvider for StubProvider {
    fn authorize_url(&self, state: &str) -> AppResult<String> {
        Ok(format!("https://idp.test/authorize?state={state}"))
    }

    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity> {
        if code == "fail" {
            return Err(AppError::external("Token exchange failed"));
        }
        Ok(ExternalIdentity {
            provider: "stub".to_string(),
            subject: format!("stub-{code}"),
            email: code.to_string(),
            name: Some("Stub User".to_string()),
        })
    }
}
