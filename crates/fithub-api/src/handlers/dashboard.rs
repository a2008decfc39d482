//! Role-area dashboards behind the member and staff gates.

use axum::Json;
use axum::extract::State;

use fithub_core::types::PageResponse;
use fithub_service::StaffSummary;
use fithub_service::membership::MemberSummary;

use crate::dto::response::{ApiResponse, MemberDashboard};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Paged};
use crate::state::AppState;

const RECENT_ORDERS: usize = 5;

/// GET /api/member/dashboard
pub async fn member_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<MemberDashboard>>> {
    let user = state.user_service.get_profile(&auth).await?;
    let membership = match state.membership_service.current(auth.user_id).await? {
        Some(m) => Some(state.membership_service.view(m).await?),
        None => None,
    };
    let recent_orders = state
        .membership_service
        .recent_orders(auth.user_id, RECENT_ORDERS)
        .await?;

    Ok(Json(ApiResponse::ok(MemberDashboard {
        user: user.profile(),
        membership,
        recent_orders,
    })))
}

/// GET /api/staff/dashboard
pub async fn staff_dashboard(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<StaffSummary>>> {
    let summary = state.analytics_service.staff_summary().await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/staff/members
pub async fn staff_members(
    State(state): State<AppState>,
    Paged(page): Paged,
) -> ApiResult<Json<ApiResponse<PageResponse<MemberSummary>>>> {
    let roster = state.membership_service.roster(page).await?;
    Ok(Json(ApiResponse::ok(roster)))
}
