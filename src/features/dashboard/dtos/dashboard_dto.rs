use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Header figures of the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub active_ads: i64,
    pub total_slots: i64,
    /// Sum of active ads' full-period prices
    pub total_active_price: Decimal,
    /// Sum of active ads' monthly equivalents
    pub total_active_monthly: Decimal,
    pub currency: String,
}
