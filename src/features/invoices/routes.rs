use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::invoices::handlers;
use crate::features::invoices::services::{InvoiceService, InvoiceSettingsService};

/// Admin routes, nested under `/api/admin`
pub fn admin_routes(
    invoices: Arc<InvoiceService>,
    settings: Arc<InvoiceSettingsService>,
) -> Router {
    let invoice_routes = Router::new()
        .route("/invoices", get(handlers::list_invoices))
        .route("/invoices/{id}", get(handlers::get_invoice))
        .route(
            "/invoices/{id}/status",
            patch(handlers::update_invoice_status),
        )
        .route("/invoices/{id}/pdf", post(handlers::generate_invoice_pdf))
        .with_state(invoices);

    let settings_routes = Router::new()
        .route(
            "/invoice-settings",
            get(handlers::get_invoice_settings).put(handlers::update_invoice_settings),
        )
        .with_state(settings);

    invoice_routes.merge(settings_routes)
}
