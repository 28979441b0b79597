use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::pricing::dtos::{PriceListDto, UpdateAdPricingDto};
use crate::features::pricing::services::PricingSettingsService;
use crate::shared::types::ApiResponse;

/// Current annual price list (public)
#[utoipa::path(
    get,
    path = "/api/pricing",
    responses(
        (status = 200, description = "Annual prices per zone", body = ApiResponse<PriceListDto>),
    ),
    tag = "pricing"
)]
pub async fn get_price_list(
    State(service): State<Arc<PricingSettingsService>>,
) -> Result<Json<ApiResponse<PriceListDto>>> {
    let prices = service.price_list().await;
    Ok(Json(ApiResponse::success(Some(prices), None, None)))
}

/// Annual price list as stored for the dashboard form
#[utoipa::path(
    get,
    path = "/api/admin/ad-pricing",
    responses(
        (status = 200, description = "Annual prices per zone", body = ApiResponse<PriceListDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn get_ad_pricing(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PricingSettingsService>>,
) -> Result<Json<ApiResponse<PriceListDto>>> {
    let prices = service.price_list().await;
    Ok(Json(ApiResponse::success(Some(prices), None, None)))
}

/// Save the annual price list
#[utoipa::path(
    put,
    path = "/api/admin/ad-pricing",
    request_body = UpdateAdPricingDto,
    responses(
        (status = 200, description = "Prices saved", body = ApiResponse<PriceListDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn update_ad_pricing(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PricingSettingsService>>,
    Json(dto): Json<UpdateAdPricingDto>,
) -> Result<Json<ApiResponse<PriceListDto>>> {
    let prices = service.save(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(prices),
        Some("Kainos išsaugotos".to_string()),
        None,
    )))
}
