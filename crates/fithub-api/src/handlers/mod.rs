//! Route handlers organized by domain.

use axum::http::HeaderName;
use axum::http::header::SET_COOKIE;
use axum::response::AppendHeaders;

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod membership;
pub mod oauth;
pub mod plan;
pub mod user;

/// Response part carrying `Set-Cookie` headers.
pub(crate) type CookieHeaders = AppendHeaders<Vec<(HeaderName, String)>>;

/// `Set-Cookie` headers for a response.
pub(crate) fn set_cookies(cookies: Vec<String>) -> CookieHeaders {
    AppendHeaders(cookies.into_iter().map(|c| (SET_COOKIE, c)).collect())
}
