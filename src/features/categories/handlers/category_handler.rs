use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::categories::dtos::{CategoryGridDto, CategoryResponseDto, HomeDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Homepage: VIP grid and sidebar categories
#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "Homepage retrieved successfully", body = ApiResponse<HomeDto>),
        (status = 404, description = "VIP category missing")
    ),
    tag = "catalog"
)]
pub async fn get_home(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<HomeDto>>> {
    let home = service.home().await?;
    Ok(Json(ApiResponse::success(Some(home), None, None)))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryResponseDto>>)
    ),
    tag = "catalog"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta::total(total)),
    )))
}

/// Category page with its slot grid
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category grid retrieved successfully", body = ApiResponse<CategoryGridDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "catalog"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryGridDto>>> {
    let grid = service.grid(&slug).await?;
    Ok(Json(ApiResponse::success(Some(grid), None, None)))
}
