use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const ARTICLE_COLUMNS: &str = "a.id, a.title, a.slug, a.body, a.body_html, a.excerpt, \
     a.cover_image_url, a.category_id, a.meta_title, a.meta_description, a.published, \
     a.published_at, a.created_by, a.created_at, a.updated_at, c.name AS category_name";

/// Database model for article, joined with its category name
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub body_html: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
}
