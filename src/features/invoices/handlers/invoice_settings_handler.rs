use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::invoices::dtos::{InvoiceSettingsDto, UpdateInvoiceSettingsDto};
use crate::features::invoices::services::InvoiceSettingsService;
use crate::shared::types::ApiResponse;

/// Seller details printed on invoices
#[utoipa::path(
    get,
    path = "/api/admin/invoice-settings",
    responses(
        (status = 200, description = "Settings retrieved", body = ApiResponse<InvoiceSettingsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "invoices",
    security(("bearer_auth" = []))
)]
pub async fn get_invoice_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<InvoiceSettingsService>>,
) -> Result<Json<ApiResponse<InvoiceSettingsDto>>> {
    let settings = service.get().await?;
    Ok(Json(ApiResponse::success(Some(settings), None, None)))
}

/// Save seller details
#[utoipa::path(
    put,
    path = "/api/admin/invoice-settings",
    request_body = UpdateInvoiceSettingsDto,
    responses(
        (status = 200, description = "Settings saved", body = ApiResponse<InvoiceSettingsDto>),
        (status = 400, description = "Company name or code missing"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "invoices",
    security(("bearer_auth" = []))
)]
pub async fn update_invoice_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<InvoiceSettingsService>>,
    ValidatedJson(dto): ValidatedJson<UpdateInvoiceSettingsDto>,
) -> Result<Json<ApiResponse<InvoiceSettingsDto>>> {
    let settings = service.save(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(settings),
        Some("Nustatymai išsaugoti".to_string()),
        None,
    )))
}
