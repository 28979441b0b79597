use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::articles::dtos::{
    ArticleCategoryDto, ArticleFormDto, ArticleResponseDto, ArticleSummaryDto,
};
use crate::features::articles::services::ArticleService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::{ApiResponse, Meta};

/// Published articles, newest first
#[utoipa::path(
    get,
    path = "/api/articles",
    responses(
        (status = 200, description = "Articles retrieved successfully", body = ApiResponse<Vec<ArticleSummaryDto>>)
    ),
    tag = "articles"
)]
pub async fn list_published_articles(
    State(service): State<Arc<ArticleService>>,
) -> Result<Json<ApiResponse<Vec<ArticleSummaryDto>>>> {
    let articles = service.list_public().await?;
    let total = articles.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(articles),
        None,
        Some(Meta::total(total)),
    )))
}

/// One published article
#[utoipa::path(
    get,
    path = "/api/articles/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article retrieved successfully", body = ApiResponse<ArticleResponseDto>),
        (status = 404, description = "Article not found or not published")
    ),
    tag = "articles"
)]
pub async fn get_published_article(
    State(service): State<Arc<ArticleService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service.get_published(&slug).await?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// All articles, drafts included
#[utoipa::path(
    get,
    path = "/api/admin/articles",
    responses(
        (status = 200, description = "Articles retrieved successfully", body = ApiResponse<Vec<ArticleResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "articles",
    security(("bearer_auth" = []))
)]
pub async fn list_articles(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ArticleService>>,
) -> Result<Json<ApiResponse<Vec<ArticleResponseDto>>>> {
    let articles = service.list_all().await?;
    let total = articles.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(articles),
        None,
        Some(Meta::total(total)),
    )))
}

/// Create an article
#[utoipa::path(
    post,
    path = "/api/admin/articles",
    request_body = ArticleFormDto,
    responses(
        (status = 201, description = "Article created", body = ApiResponse<ArticleResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "articles",
    security(("bearer_auth" = []))
)]
pub async fn create_article(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ArticleService>>,
    ValidatedJson(dto): ValidatedJson<ArticleFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<ArticleResponseDto>>)> {
    let article = service.create(dto, &user.sub).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(article),
            Some("created".to_string()),
            None,
        )),
    ))
}

/// Get article by ID
#[utoipa::path(
    get,
    path = "/api/admin/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article retrieved successfully", body = ApiResponse<ArticleResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles",
    security(("bearer_auth" = []))
)]
pub async fn get_article(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// Edit an article
#[utoipa::path(
    put,
    path = "/api/admin/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    request_body = ArticleFormDto,
    responses(
        (status = 200, description = "Article updated", body = ApiResponse<ArticleResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Article not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "articles",
    security(("bearer_auth" = []))
)]
pub async fn update_article(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ArticleFormDto>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(article),
        Some("updated".to_string()),
        None,
    )))
}

/// Delete an article
#[utoipa::path(
    delete,
    path = "/api/admin/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles",
    security(("bearer_auth" = []))
)]
pub async fn delete_article(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("deleted".to_string()),
        None,
    )))
}

/// Article categories for the editor form
#[utoipa::path(
    get,
    path = "/api/admin/article-categories",
    responses(
        (status = 200, description = "Categories retrieved", body = ApiResponse<Vec<ArticleCategoryDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "articles",
    security(("bearer_auth" = []))
)]
pub async fn list_article_categories(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ArticleService>>,
) -> Result<Json<ApiResponse<Vec<ArticleCategoryDto>>>> {
    let categories = service.categories().await;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}
