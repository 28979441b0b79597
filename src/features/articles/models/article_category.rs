use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ArticleCategory {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
