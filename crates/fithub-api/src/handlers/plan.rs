//! Public plan catalogue.

use axum::Json;
use axum::extract::State;

use fithub_entity::membership::MembershipPlan;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/plans
pub async fn list_plans(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<MembershipPlan>>>> {
    let plans = state.plan_service.list_active().await?;
    Ok(Json(ApiResponse::ok(plans)))
}
