use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::articles::handlers;
use crate::features::articles::services::ArticleService;

/// Public article routes
pub fn routes(service: Arc<ArticleService>) -> Router {
    Router::new()
        .route("/api/articles", get(handlers::list_published_articles))
        .route("/api/articles/{slug}", get(handlers::get_published_article))
        .with_state(service)
}

/// Admin routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<ArticleService>) -> Router {
    Router::new()
        .route(
            "/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .route(
            "/article-categories",
            get(handlers::list_article_categories),
        )
        .with_state(service)
}
