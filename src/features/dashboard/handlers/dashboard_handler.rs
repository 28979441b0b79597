use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Dashboard header figures
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let summary = service.get_summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
