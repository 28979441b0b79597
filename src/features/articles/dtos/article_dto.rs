use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::articles::models::{Article, ArticleCategory};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleCategoryDto {
    pub id: Uuid,
    pub name: String,
}

impl From<ArticleCategory> for ArticleCategoryDto {
    fn from(c: ArticleCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// Published article as listed on the public index
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Article> for ArticleSummaryDto {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            slug: a.slug,
            excerpt: a.excerpt,
            cover_image_url: a.cover_image_url,
            published_at: a.published_at,
        }
    }
}

/// Response DTO for article
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponseDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub body_html: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<ArticleCategoryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleResponseDto {
    fn from(a: Article) -> Self {
        let category = match (a.category_id, a.category_name) {
            (Some(id), Some(name)) => Some(ArticleCategoryDto { id, name }),
            _ => None,
        };

        Self {
            id: a.id,
            title: a.title,
            slug: a.slug,
            body: a.body,
            body_html: a.body_html,
            excerpt: a.excerpt,
            cover_image_url: a.cover_image_url,
            meta_title: a.meta_title,
            meta_description: a.meta_description,
            published: a.published,
            published_at: a.published_at,
            category,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// DTO for creating or editing an article.
///
/// An empty slug is derived from the title. `publish_now` publishes and
/// stamps `published_at`; leaving it off never unpublishes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ArticleFormDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    pub category_id: Option<Uuid>,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub body: String,
    pub body_html: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(max = 255))]
    pub meta_title: Option<String>,
    #[validate(length(max = 500))]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub publish_now: bool,
}
