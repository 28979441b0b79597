use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::ads::dtos::AdResponseDto;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::slots::models::Slot;

/// Response DTO for slot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlotResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub row_number: i32,
    pub slot_number: i32,
    pub price: Option<Decimal>,
    pub duration_months: i32,
    pub is_animated: bool,
    pub ad_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Slot> for SlotResponseDto {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id,
            category_id: s.category_id,
            row_number: s.row_number,
            slot_number: s.slot_number,
            price: s.price,
            duration_months: s.duration_months,
            is_animated: s.is_animated,
            ad_id: s.ad_id,
            created_at: s.created_at,
        }
    }
}

/// Slot with its current ad, as listed on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminSlotDto {
    #[serde(flatten)]
    pub slot: SlotResponseDto,
    pub annual_price: Decimal,
    /// Holds an active ad
    pub taken: bool,
    /// Linked ad, including an expired one
    pub ad: Option<AdResponseDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminSlotViewDto {
    pub category: CategoryResponseDto,
    pub slots: Vec<AdminSlotDto>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminSlotQuery {
    /// Category slug; defaults to the first category by name
    pub category: Option<String>,
}

/// DTO for creating a slot. Omitted fields take the defaults
/// (row 1, position 1, price 0, 12 months).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateSlotDto {
    pub category_id: Uuid,
    #[validate(range(min = 1, max = 100))]
    pub row_number: Option<i32>,
    #[validate(range(min = 1, max = 100))]
    pub slot_number: Option<i32>,
    pub price: Option<Decimal>,
    #[validate(range(min = 1, max = 120))]
    pub duration_months: Option<i32>,
    #[serde(default)]
    pub is_animated: bool,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct QuoteQuery {
    /// Booking length in months; missing or zero counts as one month
    pub duration_months: Option<i32>,
    #[serde(default)]
    pub is_animated: bool,
}
