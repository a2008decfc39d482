//! Membership self-service: overview, purchase, renew, cancel, freeze.
//!
//! Members act on their own memberships; staff may act on anyone's.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use fithub_service::membership::{MembershipOverview, MembershipView, PurchaseResult};

use crate::dto::request::{FreezeRequest, PurchaseRequest, RenewRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathId, ValidatedJson};
use crate::state::AppState;

/// GET /api/memberships/me
pub async fn my_memberships(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<MembershipOverview>>> {
    let overview = state.membership_service.overview(&auth).await?;
    Ok(Json(ApiResponse::ok(overview)))
}

/// POST /api/memberships/purchase
pub async fn purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<PurchaseRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PurchaseResult>>)> {
    let result = state.membership_service.purchase(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(result))))
}

/// POST /api/memberships/{id}/renew
pub async fn renew(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<RenewRequest>,
) -> ApiResult<Json<ApiResponse<PurchaseResult>>> {
    let result = state
        .membership_service
        .renew(&auth, id, req.payment_reference)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/memberships/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
) -> ApiResult<Json<ApiResponse<MembershipView>>> {
    let view = state.membership_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/memberships/{id}/freeze
pub async fn freeze(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<FreezeRequest>,
) -> ApiResult<Json<ApiResponse<MembershipView>>> {
    let view = state.membership_service.freeze(&auth, id, req.days).await?;
    Ok(Json(ApiResponse::ok(view)))
}
