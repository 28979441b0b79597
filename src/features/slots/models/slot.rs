use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::slots::grid::GridSlot;

/// Columns selected for [`Slot`], in declaration order
pub const SLOT_COLUMNS: &str =
    "id, category_id, row_number, slot_number, price, duration_months, is_animated, ad_id, created_at";

/// Database model for a grid position
#[derive(Debug, Clone, FromRow)]
pub struct Slot {
    pub id: Uuid,
    pub category_id: Uuid,
    pub row_number: i32,
    pub slot_number: i32,
    /// Annual price override; zero or NULL means "use the zone price"
    pub price: Option<Decimal>,
    pub duration_months: i32,
    pub is_animated: bool,
    pub ad_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl GridSlot for Slot {
    fn row_number(&self) -> i32 {
        self.row_number
    }

    fn slot_number(&self) -> i32 {
        self.slot_number
    }
}

/// Insert payload for a new slot
#[derive(Debug, Clone)]
pub struct CreateSlot {
    pub category_id: Uuid,
    pub row_number: i32,
    pub slot_number: i32,
    pub price: Decimal,
    pub duration_months: i32,
    pub is_animated: bool,
}
