//! Admin plan catalogue handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use fithub_entity::membership::MembershipPlan;

use crate::dto::request::{CreatePlanRequest, UpdatePlanRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{PathId, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/plans
pub async fn list_plans(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<MembershipPlan>>>> {
    let plans = state.plan_service.list_all().await?;
    Ok(Json(ApiResponse::ok(plans)))
}

/// POST /api/admin/plans
pub async fn create_plan(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MembershipPlan>>)> {
    let plan = state.plan_service.create(req.into()).await?;
    state.analytics_service.invalidate().await;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(plan))))
}

/// PUT /api/admin/plans/{id}
pub async fn update_plan(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdatePlanRequest>,
) -> ApiResult<Json<ApiResponse<MembershipPlan>>> {
    let plan = state.plan_service.update(id, req.into()).await?;
    state.analytics_service.invalidate().await;
    Ok(Json(ApiResponse::ok(plan)))
}
