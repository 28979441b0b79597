use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::pricing::calculator::AnnualPrices;

/// Admin-edited annual price list. Only the oldest row is used.
#[derive(Debug, Clone, FromRow)]
pub struct AdPricingSettings {
    pub id: Uuid,
    pub homepage_top_price: Decimal,
    pub homepage_other_price: Decimal,
    pub category_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdPricingSettings> for AnnualPrices {
    fn from(s: AdPricingSettings) -> Self {
        Self {
            homepage_top_price: s.homepage_top_price,
            homepage_other_price: s.homepage_other_price,
            category_price: s.category_price,
        }
    }
}
