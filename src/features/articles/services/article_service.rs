use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::articles::dtos::{
    ArticleCategoryDto, ArticleFormDto, ArticleResponseDto, ArticleSummaryDto,
};
use crate::features::articles::models::{Article, ArticleCategory, ARTICLE_COLUMNS};
use crate::features::articles::slug::slugify;

/// Service for SEO articles
pub struct ArticleService {
    pool: PgPool,
}

/// Trimmed form values ready to store
#[derive(Debug, Clone, PartialEq)]
struct ArticleFields {
    title: String,
    slug: String,
    category_id: Option<Uuid>,
    cover_image_url: Option<String>,
    body: String,
    body_html: Option<String>,
    excerpt: Option<String>,
    meta_title: Option<String>,
    meta_description: Option<String>,
    publish_now: bool,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize(dto: ArticleFormDto) -> Result<ArticleFields> {
    let title = dto.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("missing_title".to_string()));
    }

    let slug = match trimmed(dto.slug) {
        Some(typed) => slugify(&typed),
        None => slugify(&title),
    };
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Slug must contain at least one letter or digit".to_string(),
        ));
    }

    Ok(ArticleFields {
        title,
        slug,
        category_id: dto.category_id,
        cover_image_url: trimmed(dto.cover_image_url),
        body: dto.body.trim().to_string(),
        body_html: trimmed(dto.body_html),
        excerpt: trimmed(dto.excerpt),
        meta_title: trimmed(dto.meta_title),
        meta_description: trimmed(dto.meta_description),
        publish_now: dto.publish_now,
    })
}

fn write_error(code: &'static str, step: &'static str, e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("An article with this slug already exists".to_string())
        }
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            AppError::BadRequest("Unknown article category".to_string())
        }
        e => {
            tracing::error!("Article {} failed: {:?}", step, e);
            AppError::step(code, step)
        }
    }
}

impl ArticleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT {} FROM articles a LEFT JOIN article_categories c ON c.id = a.category_id {}",
            ARTICLE_COLUMNS, filter
        )
    }

    /// Published articles, newest first
    pub async fn list_published(&self) -> Result<Vec<Article>> {
        sqlx::query_as::<_, Article>(&Self::select(
            "WHERE a.published = TRUE ORDER BY a.published_at DESC NULLS LAST",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list published articles: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn list_public(&self) -> Result<Vec<ArticleSummaryDto>> {
        Ok(self
            .list_published()
            .await?
            .into_iter()
            .map(ArticleSummaryDto::from)
            .collect())
    }

    /// One published article; drafts are reported as missing
    pub async fn get_published(&self, slug: &str) -> Result<ArticleResponseDto> {
        sqlx::query_as::<_, Article>(&Self::select("WHERE a.slug = $1 AND a.published = TRUE"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch article by slug: {:?}", e);
                AppError::Database(e)
            })?
            .map(ArticleResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Article '{}' not found", slug)))
    }

    /// Every article for the dashboard, newest first
    pub async fn list_all(&self) -> Result<Vec<ArticleResponseDto>> {
        let articles = sqlx::query_as::<_, Article>(&Self::select("ORDER BY a.created_at DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list articles: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(articles.into_iter().map(ArticleResponseDto::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ArticleResponseDto> {
        sqlx::query_as::<_, Article>(&Self::select("WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch article: {:?}", e);
                AppError::Database(e)
            })?
            .map(ArticleResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Article with id {} not found", id)))
    }

    pub async fn create(&self, dto: ArticleFormDto, created_by: &str) -> Result<ArticleResponseDto> {
        let fields = normalize(dto)?;
        let now = Utc::now();

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO articles (id, title, slug, body, body_html, excerpt, cover_image_url,
                category_id, meta_title, meta_description, published, published_at, created_by,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(&fields.slug)
        .bind(&fields.body)
        .bind(&fields.body_html)
        .bind(&fields.excerpt)
        .bind(&fields.cover_image_url)
        .bind(fields.category_id)
        .bind(&fields.meta_title)
        .bind(&fields.meta_description)
        .bind(fields.publish_now)
        .bind(fields.publish_now.then_some(now))
        .bind(created_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("create_failed", "article_insert", e))?;

        tracing::info!("Article created: {} ({})", fields.slug, id);

        self.get(id).await
    }

    pub async fn update(&self, id: Uuid, dto: ArticleFormDto) -> Result<ArticleResponseDto> {
        let fields = normalize(dto)?;

        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = $2, slug = $3, body = $4, body_html = $5, excerpt = $6,
                cover_image_url = $7, category_id = $8, meta_title = $9, meta_description = $10,
                published = published OR $11,
                published_at = CASE WHEN $11 THEN NOW() ELSE published_at END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.slug)
        .bind(&fields.body)
        .bind(&fields.body_html)
        .bind(&fields.excerpt)
        .bind(&fields.cover_image_url)
        .bind(fields.category_id)
        .bind(&fields.meta_title)
        .bind(&fields.meta_description)
        .bind(fields.publish_now)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update_failed", "article_update", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article with id {} not found", id)));
        }

        tracing::info!("Article updated: {} ({})", fields.slug, id);

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete article: {:?}", e);
                AppError::step("delete_failed", "article_delete")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article with id {} not found", id)));
        }

        tracing::info!("Article deleted: {}", id);

        Ok(())
    }

    /// Article categories by name; a read error yields an empty list
    pub async fn categories(&self) -> Vec<ArticleCategoryDto> {
        let result = sqlx::query_as::<_, ArticleCategory>(
            "SELECT id, name, created_at FROM article_categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(categories) => categories.into_iter().map(ArticleCategoryDto::from).collect(),
            Err(e) => {
                tracing::warn!("Failed to list article categories: {:?}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::{Paragraph, Sentence};
    use fake::Fake;

    fn form(title: &str, slug: Option<&str>) -> ArticleFormDto {
        ArticleFormDto {
            title: title.to_string(),
            slug: slug.map(str::to_string),
            category_id: None,
            cover_image_url: Some("   ".to_string()),
            body: Paragraph(2..4).fake(),
            body_html: None,
            excerpt: Some(Sentence(3..8).fake()),
            meta_title: None,
            meta_description: Some(" ".to_string()),
            publish_now: false,
        }
    }

    #[test]
    fn test_slug_derived_from_title() {
        let fields = normalize(form("  Reklama internete  ", None)).unwrap();
        assert_eq!(fields.title, "Reklama internete");
        assert_eq!(fields.slug, "reklama-internete");
        assert_eq!(fields.cover_image_url, None);
        assert_eq!(fields.meta_description, None);
        assert!(fields.excerpt.is_some());
    }

    #[test]
    fn test_typed_slug_is_cleaned() {
        let fields = normalize(form("Bet kas", Some("Mano_Straipsnis!"))).unwrap();
        assert_eq!(fields.slug, "mano-straipsnis");

        let fields = normalize(form("Bet kas", Some("  "))).unwrap();
        assert_eq!(fields.slug, "bet-kas");
    }

    #[test]
    fn test_missing_title_and_empty_slug() {
        assert!(matches!(
            normalize(form("   ", None)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            normalize(form("???", None)),
            Err(AppError::Validation(_))
        ));
    }
}
