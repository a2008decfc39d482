//! Admin analytics.

use axum::Json;
use axum::extract::State;

use fithub_service::AnalyticsReport;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/admin/analytics
pub async fn analytics(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<AnalyticsReport>>> {
    let report = state.analytics_service.report().await?;
    Ok(Json(ApiResponse::ok(report.as_ref().clone())))
}
