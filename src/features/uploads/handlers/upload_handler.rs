use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::uploads::dtos::{
    DeleteUploadDto, DeleteUploadResponseDto, UploadFileDto, UploadPurpose, UploadResponseDto,
};
use crate::features::uploads::services::UploadService;
use crate::shared::types::ApiResponse;

/// Upload an image
///
/// Accepts multipart/form-data with:
/// - `file`: the image (required)
/// - `purpose`: "ad-logos" (default) or "article-images"
#[utoipa::path(
    post,
    path = "/api/admin/uploads",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "Image upload form with an optional purpose field",
    ),
    responses(
        (status = 201, description = "Image uploaded successfully", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Invalid file or purpose"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 413, description = "File too large")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn upload_image(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponseDto>>)> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut purpose = UploadPurpose::AdLogos;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file = Some((data.to_vec(), content_type));
            }
            "purpose" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read purpose field: {}", e))
                })?;
                if !text.trim().is_empty() {
                    purpose = UploadPurpose::parse(&text).ok_or_else(|| {
                        AppError::BadRequest(format!("Unknown upload purpose '{}'", text))
                    })?;
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let (data, content_type) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let response = service.upload_image(data, &content_type, purpose).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Delete an uploaded image by its public URL
#[utoipa::path(
    delete,
    path = "/api/admin/uploads",
    request_body = DeleteUploadDto,
    responses(
        (status = 200, description = "Image deleted", body = ApiResponse<DeleteUploadResponseDto>),
        (status = 400, description = "URL is not an upload"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_upload(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UploadService>>,
    ValidatedJson(dto): ValidatedJson<DeleteUploadDto>,
) -> Result<Json<ApiResponse<DeleteUploadResponseDto>>> {
    service.delete_by_url(&dto.url).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteUploadResponseDto { deleted: true }),
        Some("Image deleted successfully".to_string()),
        None,
    )))
}
