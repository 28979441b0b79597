use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::ads::dtos::{
    ActiveAdsDto, AdCardDto, AdResponseDto, CreateAdDto, CreateAdResponseDto, MonthlyAdStatDto,
    UpdateAdDto,
};
use crate::features::ads::services::AdService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::{ApiResponse, Meta};

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ActiveAdsQuery {
    /// Category slug filter
    pub category: Option<String>,
}

/// Public ad card
#[utoipa::path(
    get,
    path = "/api/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Ad retrieved successfully", body = ApiResponse<AdCardDto>),
        (status = 404, description = "Ad not found")
    ),
    tag = "catalog"
)]
pub async fn get_ad_card(
    State(service): State<Arc<AdService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdCardDto>>> {
    let card = service.public_card(id).await?;
    Ok(Json(ApiResponse::success(Some(card), None, None)))
}

/// Active ads with totals
#[utoipa::path(
    get,
    path = "/api/admin/ads",
    params(ActiveAdsQuery),
    responses(
        (status = 200, description = "Active ads retrieved", body = ApiResponse<ActiveAdsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_active_ads(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdService>>,
    Query(query): Query<ActiveAdsQuery>,
) -> Result<Json<ApiResponse<ActiveAdsDto>>> {
    let list = service.active_list(query.category.as_deref()).await?;
    let total = list.ads.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(list),
        None,
        Some(Meta::total(total)),
    )))
}

/// Ads created per month over the last year
#[utoipa::path(
    get,
    path = "/api/admin/ads/stats",
    responses(
        (status = 200, description = "Monthly statistics", body = ApiResponse<Vec<MonthlyAdStatDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn get_ad_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdService>>,
) -> Result<Json<ApiResponse<Vec<MonthlyAdStatDto>>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Place an ad into a slot
#[utoipa::path(
    post,
    path = "/api/admin/slots/{slot_id}/ads",
    params(
        ("slot_id" = Uuid, Path, description = "Slot ID")
    ),
    request_body = CreateAdDto,
    responses(
        (status = 201, description = "Ad created", body = ApiResponse<CreateAdResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot already holds an active ad")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn create_ad(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdService>>,
    Path(slot_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateAdDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreateAdResponseDto>>)> {
    let created = service.create_for_slot(slot_id, dto, &user.sub).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Reklama sukurta".to_string()),
            None,
        )),
    ))
}

/// Get ad by ID
#[utoipa::path(
    get,
    path = "/api/admin/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Ad retrieved successfully", body = ApiResponse<AdResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Ad not found")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn get_ad(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdResponseDto>>> {
    let ad = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(ad), None, None)))
}

/// Edit an ad
#[utoipa::path(
    put,
    path = "/api/admin/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    request_body = UpdateAdDto,
    responses(
        (status = 200, description = "Ad updated", body = ApiResponse<AdResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Ad not found")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn update_ad(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAdDto>,
) -> Result<Json<ApiResponse<AdResponseDto>>> {
    let ad = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ad),
        Some("Reklama atnaujinta".to_string()),
        None,
    )))
}

/// Delete an ad and free its slot
#[utoipa::path(
    delete,
    path = "/api/admin/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Ad deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Ad not found")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_ad(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Reklama ištrinta".to_string()),
        None,
    )))
}
