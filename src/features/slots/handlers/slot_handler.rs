use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::pricing::dtos::QuoteResponseDto;
use crate::features::slots::dtos::{
    AdminSlotQuery, AdminSlotViewDto, CreateSlotDto, QuoteQuery, SlotResponseDto,
};
use crate::features::slots::services::SlotService;
use crate::shared::types::ApiResponse;

/// Price quote for booking a slot
#[utoipa::path(
    get,
    path = "/api/slots/{id}/quote",
    params(
        ("id" = Uuid, Path, description = "Slot ID"),
        QuoteQuery
    ),
    responses(
        (status = 200, description = "Quote calculated", body = ApiResponse<QuoteResponseDto>),
        (status = 404, description = "Slot not found")
    ),
    tag = "slots"
)]
pub async fn get_slot_quote(
    State(service): State<Arc<SlotService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ApiResponse<QuoteResponseDto>>> {
    let quote = service.quote(id, query).await?;
    Ok(Json(ApiResponse::success(Some(quote), None, None)))
}

/// Slots of one category with their ads
#[utoipa::path(
    get,
    path = "/api/admin/slots",
    params(AdminSlotQuery),
    responses(
        (status = 200, description = "Slot table retrieved", body = ApiResponse<AdminSlotViewDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "No categories configured")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_admin_slots(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SlotService>>,
    Query(query): Query<AdminSlotQuery>,
) -> Result<Json<ApiResponse<AdminSlotViewDto>>> {
    let view = service.admin_view(query.category.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// Create a slot
#[utoipa::path(
    post,
    path = "/api/admin/slots",
    request_body = CreateSlotDto,
    responses(
        (status = 201, description = "Slot created", body = ApiResponse<SlotResponseDto>),
        (status = 400, description = "Invalid input or unknown category"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Position already taken")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn create_slot(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SlotService>>,
    ValidatedJson(dto): ValidatedJson<CreateSlotDto>,
) -> Result<(StatusCode, Json<ApiResponse<SlotResponseDto>>)> {
    let slot = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(slot),
            Some("Vieta sukurta".to_string()),
            None,
        )),
    ))
}
