use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::ads::lifecycle::HasValidity;

pub const AD_COLUMNS: &str = "id, slot_id, title, url, image_url, price, duration_months, \
     valid_until, is_animated, created_by, created_at";

/// Database model for an ad placed in a slot
#[derive(Debug, Clone, FromRow)]
pub struct Ad {
    pub id: Uuid,
    pub slot_id: Option<Uuid>,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    /// Price for the whole period
    pub price: Decimal,
    pub duration_months: i32,
    /// NULL means the ad never expires
    pub valid_until: Option<DateTime<Utc>>,
    pub is_animated: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl HasValidity for Ad {
    fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.valid_until
    }
}

/// Ad joined with its slot position and category, for dashboard lists
#[derive(Debug, Clone, FromRow)]
pub struct AdWithPlacement {
    #[sqlx(flatten)]
    pub ad: Ad,
    pub row_number: Option<i32>,
    pub slot_number: Option<i32>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}

impl HasValidity for AdWithPlacement {
    fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.ad.valid_until
    }
}
