use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::core::error::Result;
use crate::features::seo::services::SeoService;

/// Sitemap for search engines
#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "Sitemap", content_type = "application/xml", body = String)
    ),
    tag = "seo"
)]
pub async fn get_sitemap(State(service): State<Arc<SeoService>>) -> Result<impl IntoResponse> {
    let body = service.sitemap().await?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    ))
}

/// Crawler rules
#[utoipa::path(
    get,
    path = "/robots.txt",
    responses(
        (status = 200, description = "robots.txt", content_type = "text/plain", body = String)
    ),
    tag = "seo"
)]
pub async fn get_robots(State(service): State<Arc<SeoService>>) -> Result<impl IntoResponse> {
    let body = service.robots()?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
