//! External identity login: redirect to the provider and handle its callback.

use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use tracing::warn;

use fithub_auth::IdentityProviders;
use fithub_auth::cookie::{OAUTH_STATE_COOKIE, cookie_value};
use fithub_core::error::AppError;

use crate::dto::request::OAuthCallbackQuery;
use crate::error::{ApiError, ApiResult};
use crate::handlers::set_cookies;
use crate::state::AppState;

/// GET /api/auth/oauth/{provider}/authorize
pub async fn authorize(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> ApiResult<Response> {
    let idp = state
        .identity_providers
        .get(&provider)
        .ok_or_else(|| AppError::not_found("Unknown identity provider"))?;

    let anti_forgery = IdentityProviders::new_state();
    let url = idp.authorize_url(&anti_forgery)?;
    let cookie = state.cookies.set(
        OAUTH_STATE_COOKIE,
        &anti_forgery,
        state.config.oauth.state_ttl_seconds as i64,
    );

    Ok(found(&url, vec![cookie]))
}

/// GET /api/auth/oauth/{provider}/callback
///
/// Denials, state mismatches, and failed exchanges go to the generic error
/// page. An unknown account answers 404 `ACCOUNT_NOT_FOUND`.
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<OAuthCallbackQuery>,
    headers: HeaderMap,
) -> Response {
    let clear_state = state.cookies.clear(OAUTH_STATE_COOKIE);
    let error_page = state.config.oauth.error_redirect.as_str();

    if let Some(error) = query.error.as_deref() {
        warn!(provider = %provider, error, "Identity provider denied login");
        return found(error_page, vec![clear_state]);
    }

    let Some(idp) = state.identity_providers.get(&provider) else {
        warn!(provider = %provider, "Callback for unknown identity provider");
        return found(error_page, vec![clear_state]);
    };

    let expected = cookie_value(&headers, OAUTH_STATE_COOKIE);
    if expected.is_none() || expected != query.state {
        warn!(provider = %provider, "OAuth state mismatch");
        return found(error_page, vec![clear_state]);
    }

    let Some(code) = query.code.as_deref() else {
        warn!(provider = %provider, "OAuth callback without a code");
        return found(error_page, vec![clear_state]);
    };

    let identity = match idp.exchange(code).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!(provider = %provider, error = %e, "OAuth code exchange failed");
            return found(error_page, vec![clear_state]);
        }
    };

    match state
        .session_manager
        .external_login(identity, state.config.oauth.auto_provision)
        .await
    {
        Ok(outcome) => {
            let mut cookies = state.cookies.session(&outcome.session);
            cookies.push(clear_state);
            found(&state.config.oauth.success_redirect, cookies)
        }
        Err(e) => (set_cookies(vec![clear_state]), ApiError(e)).into_response(),
    }
}

/// 302 to `location` with the given cookies.
fn found(location: &str, cookies: Vec<String>) -> Response {
    let mut headers = vec![(LOCATION, location.to_string())];
    headers.extend(set_cookies(cookies).0);
    (StatusCode::FOUND, AppendHeaders(headers)).into_response()
}
