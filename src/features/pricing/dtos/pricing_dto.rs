use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::pricing::calculator::AnnualPrices;

/// Public price list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceListDto {
    #[serde(flatten)]
    pub prices: AnnualPrices,
    pub currency: String,
}

/// DTO for saving the annual price list.
///
/// Missing, negative or non-finite values are replaced with the defaults
/// (49 / 39 / 29) instead of being rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdPricingDto {
    pub homepage_top_price: Option<f64>,
    pub homepage_other_price: Option<f64>,
    pub category_price: Option<f64>,
}

/// Price quote for one slot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponseDto {
    pub slot_id: Uuid,
    pub category_slug: String,
    pub base_monthly_price: Decimal,
    pub duration_months: i32,
    pub duration_multiplier: Decimal,
    pub is_animated: bool,
    pub total: Decimal,
    pub currency: String,
}
