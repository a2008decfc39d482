//! Session cookie construction and token extraction.
//!
//! Cookies are written as raw `Set-Cookie` header values:
//! `HttpOnly; Path=/; SameSite=Lax; Max-Age=<ttl>`, plus `Secure` when the
//! policy demands it. Clearing a cookie repeats the attributes with
//! `Max-Age=0`.

use axum_extra::extract::CookieJar;
use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::jwt::IssuedToken;

/// Cookie carrying the session JWT.
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
/// Cookie carrying the session ID (`sid` claim).
pub const SESSION_ID_COOKIE: &str = "session_id";
/// Cookie carrying the role name.
pub const USER_ROLE_COOKIE: &str = "user_role";
/// Cookie carrying the device-trust JWT.
pub const DEVICE_TRUST_COOKIE: &str = "device_trust";
/// Cookie carrying the OAuth `state` nonce between authorize and callback.
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// The three cookies that make up a browser session.
pub const SESSION_COOKIES: [&str; 3] = [AUTH_TOKEN_COOKIE, SESSION_ID_COOKIE, USER_ROLE_COOKIE];

/// Attributes shared by every cookie FitHub sets.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    /// Append `Secure`.
    pub secure: bool,
}

impl CookiePolicy {
    /// Create a policy.
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// `Set-Cookie` value storing `value` for `max_age_seconds`.
    pub fn set(&self, name: &str, value: &str, max_age_seconds: i64) -> String {
        let mut cookie =
            format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}");
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value deleting the cookie.
    pub fn clear(&self, name: &str) -> String {
        self.set(name, "", 0)
    }

    /// The three session cookies for a freshly issued session token.
    pub fn session(&self, issued: &IssuedToken) -> Vec<String> {
        let ttl = issued.max_age_seconds();
        vec![
            self.set(AUTH_TOKEN_COOKIE, &issued.token, ttl),
            self.set(SESSION_ID_COOKIE, &issued.claims.sid.to_string(), ttl),
            self.set(USER_ROLE_COOKIE, issued.claims.role.as_str(), ttl),
        ]
    }

    /// Deletion of all three session cookies.
    pub fn clear_session(&self) -> Vec<String> {
        SESSION_COOKIES.iter().map(|name| self.clear(name)).collect()
    }
}

/// Read a non-empty cookie from the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Read a bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// The session token of a request: the `auth_token` cookie, else a bearer token.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, AUTH_TOKEN_COOKIE).or_else(|| bearer_token(headers))
}
