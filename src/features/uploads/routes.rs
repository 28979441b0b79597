use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::features::uploads::dtos::MAX_FILE_SIZE;
use crate::features::uploads::handlers;
use crate::features::uploads::services::UploadService;

/// Upload routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<UploadService>) -> Router {
    Router::new()
        .route(
            "/uploads",
            // Multipart framing needs some room above the file itself
            post(handlers::upload_image)
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024))
                .delete(handlers::delete_upload),
        )
        .with_state(service)
}
