//! `AuthUser` extractor: verifies the session cookie (or bearer token) and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use fithub_auth::Claims;
use fithub_core::error::AppError;
use fithub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Caller identity for service calls.
    pub context: RequestContext,
    /// The verified token claims.
    pub claims: Claims,
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A role gate in front of the handler has already verified the token.
        let claims = match parts.extensions.get::<Claims>() {
            Some(claims) => claims.clone(),
            None => state
                .session_manager
                .current_session(&parts.headers)
                .await?
                .ok_or_else(|| AppError::unauthorized("Authentication required"))?,
        };

        Ok(AuthUser {
            context: RequestContext::from_claims(&claims),
            claims,
        })
    }
}
