//! Role-gate middleware for the member, staff, and admin areas.
//!
//! Each gate verifies the session against the stored account, answers 401
//! without a current session and 403 for a disabled account or a role
//! outside the area's allow-set, and stores the verified claims in the
//! request extensions for the `AuthUser` extractor.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use fithub_auth::RoleGate;
use fithub_auth::rbac::{ADMIN_GATE, MEMBER_GATE, STAFF_GATE};

use crate::error::ApiResult;
use crate::state::AppState;

/// Only members.
pub async fn require_member(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    enforce(MEMBER_GATE, &state, request, next).await
}

/// Trainers, managers, and administrators.
pub async fn require_staff(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    enforce(STAFF_GATE, &state, request, next).await
}

/// Administrators and super-admins.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    enforce(ADMIN_GATE, &state, request, next).await
}

async fn enforce(
    gate: RoleGate,
    state: &AppState,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let claims = state
        .session_manager
        .current_session(request.headers())
        .await?;
    gate.check(claims.as_ref())?;

    if let Some(claims) = claims {
        request.extensions_mut().insert(claims);
    }
    Ok(next.run(request).await)
}
