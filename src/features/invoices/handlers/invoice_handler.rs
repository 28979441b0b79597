use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::invoices::dtos::{
    InvoiceListQuery, InvoicePdfResponseDto, InvoiceResponseDto, UpdateInvoiceStatusDto,
};
use crate::features::invoices::services::InvoiceService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List invoices
#[utoipa::path(
    get,
    path = "/api/admin/invoices",
    params(InvoiceListQuery, PaginationQuery),
    responses(
        (status = 200, description = "Invoices retrieved successfully", body = ApiResponse<Vec<InvoiceResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin")
    ),
    tag = "invoices",
    security(("bearer_auth" = []))
)]
pub async fn list_invoices(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<InvoiceService>>,
    Query(query): Query<InvoiceListQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<InvoiceResponseDto>>>> {
    let (invoices, total) = service.list(query.status, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(invoices),
        None,
        Some(Meta::paged(total, &pagination)),
    )))
}

/// Get invoice by ID
#[utoipa::path(
    get,
    path = "/api/admin/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice retrieved successfully", body = ApiResponse<InvoiceResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Invoice not found")
    ),
    tag = "invoices",
    security(("bearer_auth" = []))
)]
pub async fn get_invoice(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<InvoiceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceResponseDto>>> {
    let invoice = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(invoice), None, None)))
}

/// Change invoice status
#[utoipa::path(
    patch,
    path = "/api/admin/invoices/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    request_body = UpdateInvoiceStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<InvoiceResponseDto>),
        (status = 400, description = "Transition not allowed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Invoice not found")
    ),
    tag = "invoices",
    security(("bearer_auth" = []))
)]
pub async fn update_invoice_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<InvoiceService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateInvoiceStatusDto>,
) -> Result<Json<ApiResponse<InvoiceResponseDto>>> {
    let invoice = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(invoice),
        Some("Būsena atnaujinta".to_string()),
        None,
    )))
}

/// Generate and upload the invoice PDF
#[utoipa::path(
    post,
    path = "/api/admin/invoices/{id}/pdf",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "PDF generated", body = ApiResponse<InvoicePdfResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Invoice not found"),
        (status = 500, description = "pdf_failed with the failing step in errors")
    ),
    tag = "invoices",
    security(("bearer_auth" = []))
)]
pub async fn generate_invoice_pdf(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<InvoiceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoicePdfResponseDto>>> {
    let pdf = service.generate_pdf(id).await?;
    Ok(Json(ApiResponse::success(
        Some(pdf),
        Some("pdf_generated".to_string()),
        None,
    )))
}
