//! Admin user management handlers.

use axum::Json;
use axum::extract::{Query, State};

use fithub_core::types::PageResponse;
use fithub_entity::user::UserProfile;

use crate::dto::request::AdminUpdateUserRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Paged, PathId, RoleFilter, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<RoleFilter>,
    Paged(page): Paged,
) -> ApiResult<Json<ApiResponse<PageResponse<UserProfile>>>> {
    let page = state
        .admin_user_service
        .list_users(filter.role, page)
        .await?;
    Ok(Json(ApiResponse::ok(page.map(|u| u.profile()))))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> ApiResult<Json<ApiResponse<UserProfile>>> {
    let user = state.admin_user_service.get_user(id).await?;
    Ok(Json(ApiResponse::ok(user.profile())))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<AdminUpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserProfile>>> {
    let user = state
        .admin_user_service
        .update_user(&auth, id, req.into())
        .await?;
    state.analytics_service.invalidate().await;
    Ok(Json(ApiResponse::ok(user.profile())))
}
