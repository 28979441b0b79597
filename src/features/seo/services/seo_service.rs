use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::articles::ArticleService;
use crate::features::categories::CategoryService;
use crate::features::seo::sitemap::{render_robots, render_sitemap, sitemap_entries};

/// Service for crawler-facing site files
pub struct SeoService {
    categories: Arc<CategoryService>,
    articles: Arc<ArticleService>,
    base_url: String,
}

impl SeoService {
    pub fn new(
        categories: Arc<CategoryService>,
        articles: Arc<ArticleService>,
        base_url: String,
    ) -> Self {
        Self {
            categories,
            articles,
            base_url,
        }
    }

    /// sitemap.xml. Sections that cannot be read are left out.
    pub async fn sitemap(&self) -> Result<String> {
        let categories = self.categories.list().await.unwrap_or_else(|e| {
            tracing::error!("Sitemap categories unavailable: {}", e);
            Vec::new()
        });
        let articles = self.articles.list_published().await.unwrap_or_else(|e| {
            tracing::error!("Sitemap articles unavailable: {}", e);
            Vec::new()
        });

        let entries = sitemap_entries(&self.base_url, &categories, &articles, Utc::now());
        render_sitemap(&entries).map_err(|e| AppError::Internal(e.to_string()))
    }

    pub fn robots(&self) -> Result<String> {
        render_robots(&self.base_url).map_err(|e| AppError::Internal(e.to_string()))
    }
}
