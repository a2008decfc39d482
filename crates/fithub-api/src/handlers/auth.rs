//! Auth handlers: register, login, logout, session, device trust.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use fithub_auth::cookie::{DEVICE_TRUST_COOKIE, cookie_value};
use fithub_auth::session::{LoginOutcome, Registration};
use fithub_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, DeviceTrustResponse, MessageResponse, SessionResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::handlers::{CookieHeaders, set_cookies};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state
        .session_manager
        .register(Registration {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    let (cookies, body) = session_parts(&state, &outcome);
    Ok((StatusCode::CREATED, cookies, Json(body)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.session_manager.login(&req.email, &req.password).await?;
    let (cookies, body) = session_parts(&state, &outcome);
    Ok((cookies, Json(body)))
}

/// POST /api/auth/logout
///
/// Always clears the session cookies; a still-valid token is also revoked.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    state.session_manager.logout(&headers).await;
    (
        set_cookies(state.cookies.clear_session()),
        Json(ApiResponse::ok(MessageResponse::new("Logged out"))),
    )
}

/// GET /api/auth/session
pub async fn session(auth: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse::current(&auth.claims))
}

/// POST /api/auth/device-trust
pub async fn trust_device(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let issued = state.session_manager.trust_device(&auth.claims).await?;
    let cookie = state
        .cookies
        .set(DEVICE_TRUST_COOKIE, &issued.token, issued.max_age_seconds());

    Ok((
        set_cookies(vec![cookie]),
        Json(ApiResponse::ok(DeviceTrustResponse {
            expires_at: issued.claims.expires_at(),
        })),
    ))
}

/// DELETE /api/auth/device-trust
pub async fn revoke_device_trust(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = cookie_value(&headers, DEVICE_TRUST_COOKIE) {
        state.session_manager.revoke_device(&token).await;
    }
    (
        set_cookies(vec![state.cookies.clear(DEVICE_TRUST_COOKIE)]),
        Json(ApiResponse::ok(MessageResponse::new("Device trust removed"))),
    )
}

/// POST /api/auth/device-login
pub async fn device_login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let token = cookie_value(&headers, DEVICE_TRUST_COOKIE)
        .ok_or_else(|| AppError::unauthorized("Device is not trusted"))?;
    let outcome = state.session_manager.device_login(&token).await?;
    let (cookies, body) = session_parts(&state, &outcome);
    Ok((cookies, Json(body)))
}

fn session_parts(state: &AppState, outcome: &LoginOutcome) -> (CookieHeaders, SessionResponse) {
    (
        set_cookies(state.cookies.session(&outcome.session)),
        SessionResponse::issued(&outcome.user, &outcome.session.claims),
    )
}
